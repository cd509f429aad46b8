//! # Recommendation Orchestrator
//!
//! Coordinates one recommendation session:
//! 1. Load the corpus once
//! 2. Fetch the weather report
//! 3. Build the candidate pool for the reading
//! 4. Serve the initial pick and every "show another" request
//!
//! Collaborator calls happen before any session state is touched, so a slow
//! or degraded weather lookup never leaves a half-built pool behind.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use corpus::{Recipe, RecipeCorpus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use recommender::{Pick, PickOrigin, SelectionSession};
use sources::{CorpusSource, WeatherReport, WeatherSource};
use tracing::{debug, info};

/// A recipe handed to the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub recipe: Recipe,
    pub origin: PickOrigin,
    /// Weather keyword that matched the recipe; `None` for fallback picks
    /// and full-corpus pools
    pub keyword: Option<&'static str>,
}

/// Owns the corpus handle, the weather source and one `SelectionSession`
pub struct RecommendationOrchestrator {
    corpus: Arc<RecipeCorpus>,
    weather: Arc<dyn WeatherSource>,
    session: SelectionSession,
    report: Option<WeatherReport>,
    current: Option<Recipe>,
    rng: StdRng,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator with an OS-seeded generator
    pub fn new(corpus: Arc<RecipeCorpus>, weather: Arc<dyn WeatherSource>) -> Self {
        Self::with_rng(corpus, weather, StdRng::from_os_rng())
    }

    /// Create an orchestrator with a caller-supplied generator (`--seed`, tests)
    pub fn with_rng(
        corpus: Arc<RecipeCorpus>,
        weather: Arc<dyn WeatherSource>,
        rng: StdRng,
    ) -> Self {
        Self {
            corpus,
            weather,
            session: SelectionSession::default(),
            report: None,
            current: None,
            rng,
        }
    }

    /// Load the corpus from `corpus_source` and build an orchestrator on it
    pub async fn load(
        corpus_source: &dyn CorpusSource,
        weather: Arc<dyn WeatherSource>,
        rng: StdRng,
    ) -> Result<Self> {
        let start_time = Instant::now();
        let corpus = corpus_source
            .load()
            .await
            .context("Failed to load recipe corpus")?;
        info!(
            "Loaded {} recipes in {:.2?}",
            corpus.len(),
            start_time.elapsed()
        );

        Ok(Self::with_rng(Arc::new(corpus), weather, rng))
    }

    /// Fetch the weather and rebuild the pool for it.
    ///
    /// The exclusion set starts over; the recipe on screen stays until the
    /// next pick.
    pub async fn refresh_weather(&mut self) -> &WeatherReport {
        let report = self.weather.current().await;
        info!(
            source = self.weather.name(),
            place = %report.place,
            degraded = report.degraded,
            "Weather: {}",
            report.summary
        );

        self.session.rebuild(&self.corpus, &report.reading);
        info!(
            "Candidate pool has {} recipes (keyword: {:?})",
            self.session.pool().len(),
            self.session.pool().keyword()
        );

        self.report.insert(report)
    }

    /// Fetch the weather, rebuild the pool and show the first recipe.
    ///
    /// Returns `None` only when the corpus is empty.
    pub async fn start(&mut self) -> Option<Recommendation> {
        self.refresh_weather().await;

        let Some(pick) = self.session.pick_initial(&self.corpus, &mut self.rng) else {
            info!("Corpus is empty, nothing to recommend");
            self.current = None;
            return None;
        };
        Some(self.show(pick))
    }

    /// Show another recipe, never the one currently on screen.
    ///
    /// Returns `None` when no distinct alternative exists; the current
    /// recipe is left in place.
    pub fn find_more(&mut self) -> Option<Recommendation> {
        let current_id = self.current.as_ref().map(|recipe| recipe.id.as_str());
        let pick = self
            .session
            .pick_next(&self.corpus, current_id, &mut self.rng);

        match pick {
            Some(pick) => Some(self.show(pick)),
            None => {
                info!("No alternative recipe available");
                None
            }
        }
    }

    fn show(&mut self, pick: Pick) -> Recommendation {
        debug!(
            recipe_id = %pick.recipe.id,
            origin = ?pick.origin,
            shown = self.session.shown().len(),
            "Showing recipe"
        );

        let keyword = match pick.origin {
            PickOrigin::Pool => self.session.pool().keyword(),
            PickOrigin::Fallback => None,
        };
        self.current = Some(pick.recipe.clone());
        Recommendation {
            recipe: pick.recipe,
            origin: pick.origin,
            keyword,
        }
    }

    /// Recipe currently on screen
    pub fn current(&self) -> Option<&Recipe> {
        self.current.as_ref()
    }

    /// Last weather report, if the weather has been fetched
    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn corpus(&self) -> &RecipeCorpus {
        &self.corpus
    }

    pub fn session(&self) -> &SelectionSession {
        &self.session
    }
}
