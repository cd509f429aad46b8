//! Integration tests for pool building and selection.
//!
//! Picks are random, so these tests check membership and exclusion
//! properties over many seeds instead of exact picks.

use corpus::{Recipe, RecipeCorpus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use recommender::{PickOrigin, SelectionSession, WeatherReading, build_pool};
use std::collections::HashSet;

fn recipe(id: &str, title: &str, cleaned: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        ingredients: vec![],
        instructions: vec![],
        image_name: None,
        cleaned_ingredients_text: cleaned.to_string(),
    }
}

fn soup_corpus(n: usize) -> RecipeCorpus {
    RecipeCorpus::from_recipes((0..n).map(|i| recipe(&i.to_string(), &format!("Soup {i}"), "")))
}

fn cold() -> WeatherReading {
    WeatherReading::new(5, "Clear")
}

#[test]
fn test_three_soups_cycle_then_reset() {
    let corpus = RecipeCorpus::from_recipes(vec![
        recipe("A", "Soup A", ""),
        recipe("B", "Soup B", ""),
        recipe("C", "Soup C", ""),
    ]);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = SelectionSession::start(&corpus, &cold());
        assert_eq!(session.pool().len(), 3);

        let first = session.pick_initial(&corpus, &mut rng).unwrap();
        let second = session.pick_next(&corpus, Some(first.recipe.id.as_str()), &mut rng).unwrap();
        let third = session.pick_next(&corpus, Some(second.recipe.id.as_str()), &mut rng).unwrap();

        let seen: HashSet<_> = [&first, &second, &third]
            .iter()
            .map(|pick| pick.recipe.id.clone())
            .collect();
        assert_eq!(seen.len(), 3, "seed {seed}: first cycle must visit A, B and C");
        assert_eq!(session.shown().len(), 3);

        // Pool exhausted: the cycle restarts but never repeats the last pick
        let fourth = session.pick_next(&corpus, Some(third.recipe.id.as_str()), &mut rng).unwrap();
        assert_ne!(fourth.recipe.id, third.recipe.id);
        assert_eq!(fourth.origin, PickOrigin::Pool);

        let expected: HashSet<_> = [fourth.recipe.id.clone()].into();
        assert_eq!(session.shown(), &expected, "seed {seed}: reset leaves only the new pick");
    }
}

#[test]
fn test_exhaustion_before_repeat() {
    let corpus = soup_corpus(12);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = SelectionSession::start(&corpus, &cold());

        let mut seen = HashSet::new();
        let first = session.pick_initial(&corpus, &mut rng).unwrap();
        seen.insert(first.recipe.id.clone());
        let mut current = first.recipe.id;

        for _ in 1..12 {
            let pick = session.pick_next(&corpus, Some(current.as_str()), &mut rng).unwrap();
            assert!(seen.insert(pick.recipe.id.clone()), "seed {seed}: repeated {}", pick.recipe.id);
            current = pick.recipe.id;
        }
        assert_eq!(seen.len(), 12);
    }
}

#[test]
fn test_never_repeats_current_when_alternative_exists() {
    let corpus = RecipeCorpus::from_recipes(vec![
        recipe("0", "Soup", ""),
        recipe("1", "Bread", ""),
    ]);

    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = SelectionSession::start(&corpus, &cold());
        let mut current = session.pick_initial(&corpus, &mut rng).unwrap().recipe.id;

        for _ in 0..10 {
            let pick = session.pick_next(&corpus, Some(current.as_str()), &mut rng).unwrap();
            assert_ne!(pick.recipe.id, current);
            current = pick.recipe.id;
        }
    }
}

#[test]
fn test_single_recipe_corpus_has_no_next() {
    let corpus = RecipeCorpus::from_recipes(vec![recipe("A", "Soup A", "")]);
    let mut rng = StdRng::seed_from_u64(0);
    let mut session = SelectionSession::start(&corpus, &cold());

    assert_eq!(session.pool().len(), 1);
    let first = session.pick_initial(&corpus, &mut rng).unwrap();
    assert_eq!(first.recipe.id, "A");
    assert!(session.pick_next(&corpus, Some("A"), &mut rng).is_none());
}

#[test]
fn test_no_bucket_match_uses_full_corpus() {
    let corpus = RecipeCorpus::from_recipes(vec![
        recipe("A", "Toast", "bread"),
        recipe("B", "Jam", "berries"),
    ]);

    let pool = build_pool(&corpus, &cold());
    let ids: Vec<_> = pool.recipes().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
    assert_eq!(pool.keyword(), None);
}

#[test]
fn test_pool_never_empty_for_non_empty_corpus() {
    let corpus = RecipeCorpus::from_recipes(vec![recipe("0", "Plain Water", "")]);

    for temp in [-10, 10, 11, 20, 21, 40] {
        for condition in ["Clear", "Rain", "Clouds"] {
            assert!(!build_pool(&corpus, &WeatherReading::new(temp, condition)).is_empty());
        }
    }
}

#[test]
fn test_ingredient_match_builds_pool() {
    let corpus = RecipeCorpus::from_recipes(vec![
        recipe("0", "Grandma's Bowl", "chicken, rice noodle, broth"),
        recipe("1", "Pancakes", "flour, eggs"),
    ]);

    // Mild rain: curry, noodle, ramen, stir fry
    let pool = build_pool(&corpus, &WeatherReading::new(15, "Rain"));
    assert_eq!(pool.keyword(), Some("noodle"));
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.recipes()[0].id, "0");
}

#[test]
fn test_independent_sessions() {
    let corpus = soup_corpus(4);
    let mut rng = StdRng::seed_from_u64(99);

    let mut first = SelectionSession::start(&corpus, &cold());
    let second = SelectionSession::start(&corpus, &cold());

    first.pick_initial(&corpus, &mut rng).unwrap();
    assert_eq!(first.shown().len(), 1);
    assert!(second.shown().is_empty());
}
