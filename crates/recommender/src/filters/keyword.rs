//! Keyword filter: the search behind every weather bucket.

use crate::traits::Filter;
use corpus::Recipe;

/// Keeps recipes whose title or cleaned ingredient text contains a keyword.
///
/// Matching is a case-insensitive substring test.
pub struct KeywordFilter {
    keyword: String,
}

impl KeywordFilter {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

impl Filter for KeywordFilter {
    fn name(&self) -> &str {
        "KeywordFilter"
    }

    fn keep(&self, recipe: &Recipe) -> bool {
        recipe.mentions(&self.keyword)
    }
}

/// Recipes mentioning `keyword`, in their original order. Empty is a valid result.
pub fn filter_by_keyword(recipes: &[Recipe], keyword: &str) -> Vec<Recipe> {
    KeywordFilter::new(keyword)
        .par_apply(recipes)
        .into_iter()
        .cloned()
        .collect()
}
