//! Account table access.
//!
//! Two backends implement `AccountService`:
//! - `SupabaseAccountService`: a PostgREST `users(username, password_hash)` table
//! - `StoreAccountService`: the same rows kept in the local key-value store,
//!   for running without a remote table
//!
//! Usernames are unique and compared case-sensitively, exactly as stored.

use crate::error::AccountError;
use crate::kv::KeyValueStore;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

pub const ACCOUNTS_KEY: &str = "@accounts";

const USERS_TABLE: &str = "users";

/// One row of the account table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub username: String,
    pub password_hash: String,
}

/// Lowercase hex SHA-256 of `"{username}:{password}"`
pub fn hash_password(username: &str, password: &str) -> String {
    let digest = Sha256::digest(format!("{username}:{password}").as_bytes());
    format!("{digest:x}")
}

#[async_trait]
pub trait AccountService: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AccountError>;

    /// Insert a new row. An existing username is `AccountError::Duplicate`.
    async fn insert(&self, username: &str, password_hash: &str) -> Result<(), AccountError>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

// =============================================================================
// Local backend
// =============================================================================

/// Account rows kept as a JSON array in a `KeyValueStore`
pub struct StoreAccountService {
    store: Arc<dyn KeyValueStore>,
    // Serializes the read-check-write in `insert`
    write_lock: Mutex<()>,
}

impl StoreAccountService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn rows(&self) -> Result<Vec<AccountRecord>, AccountError> {
        match self.store.get(ACCOUNTS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw).map_err(crate::error::StorageError::from)?),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl AccountService for StoreAccountService {
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AccountError> {
        Ok(self
            .rows()
            .await?
            .into_iter()
            .find(|row| row.username == username))
    }

    async fn insert(&self, username: &str, password_hash: &str) -> Result<(), AccountError> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.rows().await?;
        if rows.iter().any(|row| row.username == username) {
            return Err(AccountError::Duplicate(username.to_string()));
        }

        rows.push(AccountRecord {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        });
        let encoded = serde_json::to_string(&rows).map_err(crate::error::StorageError::from)?;
        self.store.set(ACCOUNTS_KEY, encoded).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

// =============================================================================
// Supabase backend
// =============================================================================

/// PostgREST client for a Supabase `users` table
#[derive(Debug, Clone)]
pub struct SupabaseAccountService {
    http_client: HttpClient,
    base_url: String,
    anon_key: String,
}

impl SupabaseAccountService {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, USERS_TABLE)
    }

    async fn remote_error(response: reqwest::Response) -> AccountError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        AccountError::Remote { status, message }
    }
}

#[async_trait]
impl AccountService for SupabaseAccountService {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AccountError> {
        let response = self
            .http_client
            .get(self.table_url())
            .query(&[
                ("select", "username,password_hash".to_string()),
                ("username", format!("eq.{username}")),
            ])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let rows: Vec<AccountRecord> = response.json().await?;
        debug!("Account lookup returned {} rows", rows.len());
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self, password_hash))]
    async fn insert(&self, username: &str, password_hash: &str) -> Result<(), AccountError> {
        let row = AccountRecord {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };

        let response = self
            .http_client
            .post(self.table_url())
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.anon_key)
            .json(&[row])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // Unique violation on username
            StatusCode::CONFLICT => Err(AccountError::Duplicate(username.to_string())),
            _ => Err(Self::remote_error(response).await),
        }
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}
