//! Error types for the corpus crate.
//!
//! Only whole-file problems surface here. A single malformed row never
//! aborts a load; the parser degrades it instead.

use thiserror::Error;

/// Errors that can occur while loading the recipe corpus
#[derive(Error, Debug)]
pub enum CorpusLoadError {
    /// File could not be found or opened
    #[error("Failed to open recipe file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader could not make sense of the data (bad header, bad encoding)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The source parsed but held no recipe rows
    #[error("Recipe source {source_name} contains no recipes")]
    Empty { source_name: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CorpusLoadError>;
