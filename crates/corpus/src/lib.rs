//! # Corpus Crate
//!
//! Loads the local recipe dataset (a CSV export) into an ordered, in-memory
//! `RecipeCorpus`.
//!
//! ## Main Components
//!
//! - **types**: `Recipe`, `RecipeId`, `RecipeCorpus`
//! - **parser**: CSV rows into normalized recipes
//! - **load**: reading the corpus from a file
//! - **error**: `CorpusLoadError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use corpus::RecipeCorpus;
//! use std::path::Path;
//!
//! let corpus = RecipeCorpus::load_from_file(Path::new("assets/recipe.csv"))?;
//! let recipe = corpus.get("0").unwrap();
//! println!("{} has {} steps", recipe.title, recipe.instructions.len());
//! ```

pub mod error;
pub mod load;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CorpusLoadError, Result};
pub use types::{Recipe, RecipeCorpus, RecipeId};
