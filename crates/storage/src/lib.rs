//! # Storage Crate
//!
//! Device-local persistence and the account table.
//!
//! ## Main Components
//!
//! - **kv**: the `KeyValueStore` trait with in-memory and JSON-file stores
//! - **saved**: saved recipes, unique by id
//! - **session**: the currently logged-in user
//! - **accounts**: `AccountService` over a Supabase table or the local store
//! - **error**: `StorageError` and `AccountError`
//!
//! All stores are async and last-write-wins. Typed stores keep JSON strings
//! under fixed keys so that one store file holds everything.

pub mod accounts;
pub mod error;
pub mod kv;
pub mod saved;
pub mod session;

// Re-export commonly used types for convenience
pub use accounts::{
    ACCOUNTS_KEY, AccountRecord, AccountService, StoreAccountService, SupabaseAccountService,
    hash_password,
};
pub use error::{AccountError, Result, StorageError};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use saved::{SAVED_RECIPES_KEY, SavedRecipe, SavedRecipeStore};
pub use session::{SessionStore, USER_SESSION_KEY, UserSession};
