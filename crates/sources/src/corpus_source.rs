//! Corpus sources.
//!
//! Loading happens once at startup. Parsing is CPU-bound, so the CSV source
//! moves it onto the blocking thread pool.

use async_trait::async_trait;
use corpus::{CorpusLoadError, RecipeCorpus};
use std::path::PathBuf;
use tracing::instrument;

/// Something that can produce the recipe corpus
#[async_trait]
pub trait CorpusSource: Send + Sync {
    async fn load(&self) -> corpus::Result<RecipeCorpus>;
}

/// Reads the corpus from a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvCorpusSource {
    path: PathBuf,
}

impl CsvCorpusSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl CorpusSource for CsvCorpusSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> corpus::Result<RecipeCorpus> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || RecipeCorpus::load_from_file(&path))
            .await
            .map_err(|e| {
                CorpusLoadError::IoError(std::io::Error::other(format!(
                    "corpus loader task failed: {e}"
                )))
            })?
    }
}
