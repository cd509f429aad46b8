//! Core domain types for the recipe corpus.
//!
//! A `Recipe` is created once when the corpus is loaded and never changes
//! afterwards. `RecipeCorpus` owns every recipe and keeps them in source
//! order, which is what keyword filtering and selection rely on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier for a recipe: the zero-based row position in the source
pub type RecipeId = String;

// =============================================================================
// Recipe
// =============================================================================

/// A normalized recipe record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Name of the image asset shipped with the dataset, if any
    pub image_name: Option<String>,
    /// Lowercased ingredient text used for keyword search
    pub cleaned_ingredients_text: String,
}

impl Recipe {
    /// Case-insensitive substring match against the title or cleaned ingredients.
    ///
    /// `keyword` must already be lowercase.
    pub fn mentions(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(keyword)
            || self.cleaned_ingredients_text.contains(keyword)
    }
}

// =============================================================================
// RecipeCorpus - The In-Memory Recipe List
// =============================================================================

/// Ordered, owned list of every recipe available to the app.
///
/// Lookups by id go through a HashMap of positions; everything else works on
/// the ordered slice.
#[derive(Debug, Clone, Default)]
pub struct RecipeCorpus {
    pub(crate) recipes: Vec<Recipe>,
    pub(crate) positions: HashMap<RecipeId, usize>,
}

impl RecipeCorpus {
    /// Creates a new, empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from recipes that are already in source order
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut corpus = Self::new();
        for recipe in recipes {
            corpus.insert(recipe);
        }
        corpus
    }

    /// Append a recipe. A recipe whose id is already present replaces the
    /// earlier record in place so ids stay unique.
    pub fn insert(&mut self, recipe: Recipe) {
        match self.positions.get(&recipe.id) {
            Some(&pos) => self.recipes[pos] = recipe,
            None => {
                self.positions.insert(recipe.id.clone(), self.recipes.len());
                self.recipes.push(recipe);
            }
        }
    }

    /// Get a recipe by id
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.positions.get(id).map(|&pos| &self.recipes[pos])
    }

    /// All recipes, in source order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes whose title contains `query`, case-insensitively, in corpus order
    pub fn search_title(&self, query: &str) -> Vec<&Recipe> {
        let query = query.to_lowercase();
        self.recipes
            .iter()
            .filter(|recipe| recipe.title.to_lowercase().contains(&query))
            .collect()
    }
}
