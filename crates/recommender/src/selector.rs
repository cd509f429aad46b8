//! # Candidate Selector
//!
//! Serves one recipe at a time from a weather-matched pool without repeating
//! itself inside a cycle:
//!
//! 1. `pick_initial` draws from the pool (or the whole corpus when the pool
//!    is empty)
//! 2. every `pick_next` draws from pool members not yet shown this cycle,
//!    never the recipe currently on screen
//! 3. once the pool is used up the cycle restarts
//! 4. when the pool cannot offer anything new, the pick falls back to the
//!    whole corpus
//!
//! Fallback picks are not recorded in the exclusion set, so the set only
//! ever holds ids from the current pool.
//!
//! The session is an explicit value and randomness is passed in, so
//! independent sessions never share state and tests can seed the generator.

use crate::filters::ExcludeIdsFilter;
use crate::pool::CandidatePool;
use crate::traits::Filter;
use crate::weather::WeatherReading;
use corpus::{Recipe, RecipeCorpus, RecipeId};
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Where a pick came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOrigin {
    /// Drawn from the weather-matched pool and recorded for this cycle
    Pool,
    /// Drawn from the whole corpus, untracked
    Fallback,
}

/// A selected recipe plus its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub recipe: Recipe,
    pub origin: PickOrigin,
}

/// Pool and exclusion state for one recommendation session.
#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    pool: CandidatePool,
    shown: HashSet<RecipeId>,
}

impl SelectionSession {
    /// Start a cycle over an existing pool
    pub fn new(pool: CandidatePool) -> Self {
        Self {
            pool,
            shown: HashSet::new(),
        }
    }

    /// Build the pool for `reading` and start a fresh cycle
    pub fn start(corpus: &RecipeCorpus, reading: &WeatherReading) -> Self {
        Self::new(CandidatePool::build(corpus, reading))
    }

    /// Replace the pool for a new reading. The exclusion set is cleared.
    pub fn rebuild(&mut self, corpus: &RecipeCorpus, reading: &WeatherReading) {
        self.pool = CandidatePool::build(corpus, reading);
        self.shown.clear();
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Ids shown from the pool during the current cycle
    pub fn shown(&self) -> &HashSet<RecipeId> {
        &self.shown
    }

    /// First recommendation for a new pool.
    ///
    /// Returns `None` only when the corpus is empty.
    pub fn pick_initial<R: Rng>(&mut self, corpus: &RecipeCorpus, rng: &mut R) -> Option<Pick> {
        if self.pool.is_empty() {
            let recipe = choose(&corpus.recipes().iter().collect::<Vec<_>>(), rng)?.clone();
            return Some(Pick {
                recipe,
                origin: PickOrigin::Fallback,
            });
        }

        let candidates: Vec<&Recipe> = self.pool.recipes().iter().collect();
        let recipe = choose(&candidates, rng)?.clone();
        self.shown.insert(recipe.id.clone());
        Some(Pick {
            recipe,
            origin: PickOrigin::Pool,
        })
    }

    /// Next recommendation after `current_id`.
    ///
    /// Never returns `current_id` when any other recipe exists in the corpus;
    /// returns `None` when no distinct alternative exists.
    pub fn pick_next<R: Rng>(
        &mut self,
        corpus: &RecipeCorpus,
        current_id: Option<&str>,
        rng: &mut R,
    ) -> Option<Pick> {
        let is_current = |recipe: &Recipe| Some(recipe.id.as_str()) == current_id;

        // Nothing in the pool besides the current recipe
        if self.pool.recipes().iter().all(|recipe| is_current(recipe)) {
            debug!("Pool exhausted, falling back to the full corpus");
            return pick_fallback(corpus, current_id, rng);
        }

        let mut unused = ExcludeIdsFilter::new(&self.shown).apply(self.pool.recipes());
        if unused.is_empty() {
            debug!("Cycle of {} recipes complete, restarting", self.pool.len());
            self.shown.clear();
            unused = self.pool.recipes().iter().collect();
        }
        unused.retain(|recipe| !is_current(recipe));

        let Some(recipe) = choose(&unused, rng).cloned() else {
            debug!("No unused pool recipe besides the current one, falling back");
            return pick_fallback(corpus, current_id, rng);
        };

        self.shown.insert(recipe.id.clone());
        Some(Pick {
            recipe,
            origin: PickOrigin::Pool,
        })
    }
}

/// Uniform pick from the whole corpus, excluding `current_id`
fn pick_fallback<R: Rng>(
    corpus: &RecipeCorpus,
    current_id: Option<&str>,
    rng: &mut R,
) -> Option<Pick> {
    let others: Vec<&Recipe> = corpus
        .recipes()
        .iter()
        .filter(|recipe| Some(recipe.id.as_str()) != current_id)
        .collect();

    let recipe = choose(&others, rng)?.clone();
    Some(Pick {
        recipe,
        origin: PickOrigin::Fallback,
    })
}

fn choose<'a, R: Rng>(candidates: &[&'a Recipe], rng: &mut R) -> Option<&'a Recipe> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn recipe(id: &str, title: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            ingredients: vec![],
            instructions: vec![],
            image_name: None,
            cleaned_ingredients_text: String::new(),
        }
    }

    fn cold() -> WeatherReading {
        WeatherReading::new(5, "Clear")
    }

    #[test]
    fn test_pick_initial_tracks_pool_pick() {
        let corpus = RecipeCorpus::from_recipes(vec![recipe("0", "Soup A"), recipe("1", "Toast")]);
        let mut session = SelectionSession::start(&corpus, &cold());
        let mut rng = StdRng::seed_from_u64(7);

        let pick = session.pick_initial(&corpus, &mut rng).unwrap();
        assert_eq!(pick.recipe.id, "0");
        assert_eq!(pick.origin, PickOrigin::Pool);
        assert!(session.shown().contains("0"));
    }

    #[test]
    fn test_empty_corpus_returns_none() {
        let corpus = RecipeCorpus::new();
        let mut session = SelectionSession::start(&corpus, &cold());
        let mut rng = StdRng::seed_from_u64(1);

        assert!(session.pick_initial(&corpus, &mut rng).is_none());
        assert!(session.pick_next(&corpus, None, &mut rng).is_none());
        assert!(session.pick_next(&corpus, Some("0"), &mut rng).is_none());
    }

    #[test]
    fn test_empty_pool_initial_pick_uses_corpus_untracked() {
        let corpus = RecipeCorpus::from_recipes(vec![recipe("0", "Toast")]);
        let mut session = SelectionSession::new(CandidatePool::default());
        let mut rng = StdRng::seed_from_u64(3);

        let pick = session.pick_initial(&corpus, &mut rng).unwrap();
        assert_eq!(pick.recipe.id, "0");
        assert_eq!(pick.origin, PickOrigin::Fallback);
        assert!(session.shown().is_empty());
    }

    #[test]
    fn test_single_recipe_pool_and_corpus_has_no_alternative() {
        let corpus = RecipeCorpus::from_recipes(vec![recipe("A", "Soup")]);
        let mut session = SelectionSession::start(&corpus, &cold());
        let mut rng = StdRng::seed_from_u64(11);

        let first = session.pick_initial(&corpus, &mut rng).unwrap();
        assert_eq!(first.recipe.id, "A");
        assert!(session.pick_next(&corpus, Some("A"), &mut rng).is_none());
    }

    #[test]
    fn test_single_recipe_pool_falls_back_to_other_corpus_recipes() {
        let corpus = RecipeCorpus::from_recipes(vec![
            recipe("0", "Soup"),
            recipe("1", "Toast"),
            recipe("2", "Jam"),
        ]);
        let mut session = SelectionSession::start(&corpus, &cold());
        let mut rng = StdRng::seed_from_u64(5);

        session.pick_initial(&corpus, &mut rng).unwrap();
        for _ in 0..20 {
            let pick = session.pick_next(&corpus, Some("0"), &mut rng).unwrap();
            assert_ne!(pick.recipe.id, "0");
            assert_eq!(pick.origin, PickOrigin::Fallback);
        }
        // Fallback picks are never recorded
        assert_eq!(session.shown().len(), 1);
        assert!(session.shown().contains("0"));
    }

    #[test]
    fn test_current_from_fallback_is_served_by_pool() {
        // Current recipe came from outside the pool; the pool member is still unused
        let corpus = RecipeCorpus::from_recipes(vec![recipe("0", "Soup"), recipe("1", "Toast")]);
        let mut session = SelectionSession::start(&corpus, &cold());
        let mut rng = StdRng::seed_from_u64(9);

        let pick = session.pick_next(&corpus, Some("1"), &mut rng).unwrap();
        assert_eq!(pick.recipe.id, "0");
        assert_eq!(pick.origin, PickOrigin::Pool);
    }

    #[test]
    fn test_only_current_unused_falls_back_to_corpus() {
        // Pool [0,1], 1 already shown, current is 0 (reached through a fallback)
        let corpus = RecipeCorpus::from_recipes(vec![
            recipe("0", "Soup A"),
            recipe("1", "Soup B"),
            recipe("2", "Toast"),
        ]);
        let mut session = SelectionSession::start(&corpus, &cold());
        session.shown.insert("1".to_string());
        let mut rng = StdRng::seed_from_u64(2);

        let pick = session.pick_next(&corpus, Some("0"), &mut rng).unwrap();
        assert_ne!(pick.recipe.id, "0");
        assert_eq!(pick.origin, PickOrigin::Fallback);
    }

    #[test]
    fn test_rebuild_clears_exclusions() {
        let corpus = RecipeCorpus::from_recipes(vec![
            recipe("0", "Soup"),
            recipe("1", "Salad"),
        ]);
        let mut session = SelectionSession::start(&corpus, &cold());
        let mut rng = StdRng::seed_from_u64(4);
        session.pick_initial(&corpus, &mut rng).unwrap();
        assert!(!session.shown().is_empty());

        session.rebuild(&corpus, &WeatherReading::new(30, "Clear"));
        assert!(session.shown().is_empty());
        assert_eq!(session.pool().keyword(), Some("salad"));
    }

    #[test]
    fn test_exclusions_stay_within_pool() {
        let corpus = RecipeCorpus::from_recipes(vec![
            recipe("0", "Soup A"),
            recipe("1", "Soup B"),
            recipe("2", "Toast"),
            recipe("3", "Jam"),
        ]);
        let mut session = SelectionSession::start(&corpus, &cold());
        let mut rng = StdRng::seed_from_u64(21);

        let mut current = session.pick_initial(&corpus, &mut rng).map(|p| p.recipe.id);
        for _ in 0..50 {
            let pick = session.pick_next(&corpus, current.as_deref(), &mut rng).unwrap();
            assert_ne!(Some(pick.recipe.id.as_str()), current.as_deref());
            assert!(session.shown().iter().all(|id| session.pool().contains(id)));
            current = Some(pick.recipe.id);
        }
    }
}
