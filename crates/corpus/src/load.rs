//! Loading a `RecipeCorpus` from disk.

use crate::error::{CorpusLoadError, Result};
use crate::parser;
use crate::types::RecipeCorpus;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use std::time::Instant;
use tracing::info;

impl RecipeCorpus {
    /// Load the recipe CSV at `path`.
    ///
    /// Fails when the file cannot be read or holds no recipe rows. Malformed
    /// rows are normalized best-effort instead of failing the load.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let start = Instant::now();
        info!("Loading recipe corpus from {:?}", path);

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CorpusLoadError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => CorpusLoadError::IoError(e),
        })?;

        let recipes = parser::parse_recipes(BufReader::new(file))?;
        if recipes.is_empty() {
            return Err(CorpusLoadError::Empty {
                source_name: path.display().to_string(),
            });
        }

        let corpus = RecipeCorpus::from_recipes(recipes);
        info!(
            "Loaded {} recipes in {:.2?}",
            corpus.len(),
            start.elapsed()
        );
        Ok(corpus)
    }
}
