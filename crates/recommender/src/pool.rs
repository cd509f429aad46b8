//! Candidate pool construction.

use crate::filters::KeywordFilter;
use crate::traits::Filter;
use crate::weather::WeatherReading;
use corpus::{Recipe, RecipeCorpus};
use tracing::{debug, instrument};

/// Weather-matched recipes, in corpus order.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    recipes: Vec<Recipe>,
    /// Bucket keyword that produced the pool; `None` for the full-corpus fallback
    keyword: Option<&'static str>,
}

impl CandidatePool {
    /// Search the corpus bucket by bucket and keep the first bucket with any
    /// match. When no bucket matches, the pool is the whole corpus, so the
    /// pool is only empty when the corpus is.
    #[instrument(skip(corpus), fields(corpus_size = corpus.len()))]
    pub fn build(corpus: &RecipeCorpus, reading: &WeatherReading) -> Self {
        for &keyword in reading.keyword_buckets() {
            let filter = KeywordFilter::new(keyword);
            let matches = filter.par_apply(corpus.recipes());
            debug!(
                "{} '{}' matched {} recipes",
                filter.name(),
                keyword,
                matches.len()
            );
            if !matches.is_empty() {
                return Self {
                    recipes: matches.into_iter().cloned().collect(),
                    keyword: Some(keyword),
                };
            }
        }

        debug!("No weather bucket matched, using the full corpus");
        Self {
            recipes: corpus.recipes().to_vec(),
            keyword: None,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn keyword(&self) -> Option<&'static str> {
        self.keyword
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.recipes.iter().any(|recipe| recipe.id == id)
    }
}

/// Build the candidate pool for a reading
pub fn build_pool(corpus: &RecipeCorpus, reading: &WeatherReading) -> CandidatePool {
    CandidatePool::build(corpus, reading)
}
