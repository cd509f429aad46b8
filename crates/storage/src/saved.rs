//! Saved ("favourite") recipes.
//!
//! The whole list lives as one JSON array under `SAVED_RECIPES_KEY`. Each
//! entry copies the recipe fields needed to show it offline.

use crate::error::Result;
use crate::kv::KeyValueStore;
use chrono::{DateTime, Utc};
use corpus::{Recipe, RecipeId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub const SAVED_RECIPES_KEY: &str = "@saved_recipes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub saved_at: DateTime<Utc>,
}

impl SavedRecipe {
    pub fn from_recipe(recipe: &Recipe, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            image_name: recipe.image_name.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            saved_at,
        }
    }
}

/// Append-only list of saved recipes, unique by id
#[derive(Clone)]
pub struct SavedRecipeStore {
    store: Arc<dyn KeyValueStore>,
}

impl SavedRecipeStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved recipes in the order they were saved. An absent key is an empty list.
    pub async fn list(&self) -> Result<Vec<SavedRecipe>> {
        match self.store.get(SAVED_RECIPES_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// The saved copy of recipe `id`, with the details captured when it was saved
    pub async fn get(&self, id: &str) -> Result<Option<SavedRecipe>> {
        Ok(self.list().await?.into_iter().find(|saved| saved.id == id))
    }

    pub async fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// Save `recipe` unless it is already saved. Returns whether it was added.
    pub async fn save(&self, recipe: &Recipe) -> Result<bool> {
        let mut saved = self.list().await?;
        if saved.iter().any(|existing| existing.id == recipe.id) {
            return Ok(false);
        }

        saved.push(SavedRecipe::from_recipe(recipe, Utc::now()));
        self.store
            .set(SAVED_RECIPES_KEY, serde_json::to_string(&saved)?)
            .await?;
        info!(recipe_id = %recipe.id, total = saved.len(), "Saved recipe");
        Ok(true)
    }
}
