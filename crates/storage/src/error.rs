//! Error types for the storage crate.

use thiserror::Error;

/// Failures of the local key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded
    #[error("Stored data is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of registration and login
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Please enter both username and password")]
    MissingInfo,

    #[error("Username '{0}' already exists")]
    Duplicate(String),

    #[error("Username/password does not match a registered account")]
    AuthMismatch,

    #[error("Please log in to view saved recipes")]
    LoginRequired,

    #[error("Account service unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Account service returned status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, StorageError>;
