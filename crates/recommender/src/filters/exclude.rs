//! Filter that drops recipes already shown in the current cycle.

use crate::traits::Filter;
use corpus::{Recipe, RecipeId};
use std::collections::HashSet;

/// Removes recipes whose id is in the borrowed exclusion set.
///
/// Uses the HashSet for O(1) lookups.
pub struct ExcludeIdsFilter<'s> {
    excluded: &'s HashSet<RecipeId>,
}

impl<'s> ExcludeIdsFilter<'s> {
    pub fn new(excluded: &'s HashSet<RecipeId>) -> Self {
        Self { excluded }
    }
}

impl Filter for ExcludeIdsFilter<'_> {
    fn name(&self) -> &str {
        "ExcludeIdsFilter"
    }

    fn keep(&self, recipe: &Recipe) -> bool {
        !self.excluded.contains(&recipe.id)
    }
}
