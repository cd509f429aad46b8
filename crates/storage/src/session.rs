//! The logged-in user, if any.

use crate::error::Result;
use crate::kv::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const USER_SESSION_KEY: &str = "@user_profile";

/// Stores the username only, never the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub username: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub logged_in_at: DateTime<Utc>,
}

/// At most one active session; absence means logged out
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn current(&self) -> Result<Option<UserSession>> {
        match self.store.get(USER_SESSION_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Replace any existing session with one for `username`
    pub async fn start(&self, username: &str) -> Result<UserSession> {
        let session = UserSession {
            username: username.to_string(),
            logged_in_at: Utc::now(),
        };
        self.store
            .set(USER_SESSION_KEY, serde_json::to_string(&session)?)
            .await?;
        Ok(session)
    }

    pub async fn end(&self) -> Result<()> {
        self.store.remove(USER_SESSION_KEY).await
    }
}
