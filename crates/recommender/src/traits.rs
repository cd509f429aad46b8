//! Core traits for candidate filtering.

use corpus::Recipe;
use rayon::prelude::*;

/// A predicate over recipes that can be applied to a whole slice.
///
/// ## Design Note
/// - `apply` scans sequentially; per-pick filtering over a small pool stays
///   on the calling thread
/// - `Send + Sync` lets `par_apply` scan the whole corpus with rayon
/// - both borrow: filtering never copies recipes, callers clone the few
///   they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `recipe` passes this filter
    fn keep(&self, recipe: &Recipe) -> bool;

    /// Apply this filter to a set of recipes, preserving their order.
    fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|recipe| self.keep(recipe)).collect()
    }

    /// Same result as `apply`, scanned in parallel. Meant for full-corpus scans.
    fn par_apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.par_iter().filter(|recipe| self.keep(recipe)).collect()
    }
}
