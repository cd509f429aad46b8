//! Accounts, the login session and saved recipes.

use std::sync::Arc;

use corpus::Recipe;
use storage::{
    AccountError, AccountService, KeyValueStore, SavedRecipe, SavedRecipeStore, SessionStore,
    UserSession, hash_password,
};
use tracing::{info, instrument};

/// User-facing profile flows over an account backend and the local store
pub struct ProfileService {
    accounts: Arc<dyn AccountService>,
    sessions: SessionStore,
    saved: SavedRecipeStore,
}

impl ProfileService {
    pub fn new(accounts: Arc<dyn AccountService>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            accounts,
            sessions: SessionStore::new(store.clone()),
            saved: SavedRecipeStore::new(store),
        }
    }

    /// Create an account. Does not log in.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AccountError> {
        require_credentials(username, password)?;

        if self.accounts.find_by_username(username).await?.is_some() {
            return Err(AccountError::Duplicate(username.to_string()));
        }
        self.accounts
            .insert(username, &hash_password(username, password))
            .await?;

        info!(backend = self.accounts.name(), "Registered account");
        Ok(())
    }

    /// Check the credentials and replace the current session
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<UserSession, AccountError> {
        require_credentials(username, password)?;

        let account = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or(AccountError::AuthMismatch)?;
        if account.password_hash != hash_password(username, password) {
            return Err(AccountError::AuthMismatch);
        }

        let session = self.sessions.start(username).await?;
        info!(backend = self.accounts.name(), "Logged in");
        Ok(session)
    }

    /// End the session. Returns the session that was ended, if any.
    pub async fn logout(&self) -> Result<Option<UserSession>, AccountError> {
        let previous = self.sessions.current().await?;
        self.sessions.end().await?;
        if let Some(session) = &previous {
            info!(username = %session.username, "Logged out");
        }
        Ok(previous)
    }

    pub async fn current_user(&self) -> Result<Option<UserSession>, AccountError> {
        Ok(self.sessions.current().await?)
    }

    /// Save a recipe. Works with or without a session.
    pub async fn save_recipe(&self, recipe: &Recipe) -> Result<bool, AccountError> {
        Ok(self.saved.save(recipe).await?)
    }

    /// Saved recipes, only while logged in
    pub async fn saved_recipes(&self) -> Result<Vec<SavedRecipe>, AccountError> {
        self.require_session().await?;
        Ok(self.saved.list().await?)
    }

    /// One saved recipe with its stored details, only while logged in.
    ///
    /// Reads the saved copy, so it works without the recipe corpus.
    pub async fn saved_recipe(&self, id: &str) -> Result<Option<SavedRecipe>, AccountError> {
        self.require_session().await?;
        Ok(self.saved.get(id).await?)
    }

    async fn require_session(&self) -> Result<UserSession, AccountError> {
        self.sessions
            .current()
            .await?
            .ok_or(AccountError::LoginRequired)
    }
}

fn require_credentials(username: &str, password: &str) -> Result<(), AccountError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AccountError::MissingInfo);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use storage::{AccountRecord, MemoryStore};

    mock! {
        pub Accounts {}

        #[async_trait]
        impl AccountService for Accounts {
            async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AccountError>;
            async fn insert(&self, username: &str, password_hash: &str) -> Result<(), AccountError>;
            fn name(&self) -> &'static str;
        }
    }

    fn service(accounts: MockAccounts) -> ProfileService {
        ProfileService::new(Arc::new(accounts), Arc::new(MemoryStore::new()))
    }

    fn ada_record() -> AccountRecord {
        AccountRecord {
            username: "ada".to_string(),
            password_hash: hash_password("ada", "secret"),
        }
    }

    #[tokio::test]
    async fn test_register_inserts_hash() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_find_by_username()
            .withf(|username| username == "ada")
            .times(1)
            .returning(|_| Ok(None));
        accounts
            .expect_insert()
            .withf(|username, hash| username == "ada" && hash == hash_password("ada", "secret"))
            .times(1)
            .returning(|_, _| Ok(()));
        accounts.expect_name().return_const("mock");

        service(accounts).register("ada", "secret").await.unwrap();
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_find_by_username()
            .returning(|_| Ok(Some(ada_record())));
        accounts.expect_insert().never();

        let err = service(accounts).register("ada", "other").await.unwrap_err();
        assert!(matches!(err, AccountError::Duplicate(name) if name == "ada"));
    }

    #[tokio::test]
    async fn test_missing_info_skips_backend() {
        let mut accounts = MockAccounts::new();
        accounts.expect_find_by_username().never();
        accounts.expect_insert().never();
        let profiles = service(accounts);

        assert!(matches!(
            profiles.register("", "secret").await,
            Err(AccountError::MissingInfo)
        ));
        assert!(matches!(
            profiles.login("ada", "").await,
            Err(AccountError::MissingInfo)
        ));
    }

    #[tokio::test]
    async fn test_login_checks_hash() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_find_by_username()
            .returning(|username| Ok((username == "ada").then(ada_record)));
        accounts.expect_name().return_const("mock");
        let profiles = service(accounts);

        assert!(matches!(
            profiles.login("ada", "wrong").await,
            Err(AccountError::AuthMismatch)
        ));
        assert!(matches!(
            profiles.login("grace", "secret").await,
            Err(AccountError::AuthMismatch)
        ));
        assert_eq!(profiles.current_user().await.unwrap(), None);

        let session = profiles.login("ada", "secret").await.unwrap();
        assert_eq!(session.username, "ada");
        assert_eq!(
            profiles.current_user().await.unwrap().map(|s| s.username),
            Some("ada".to_string())
        );
    }

    #[tokio::test]
    async fn test_saved_recipes_require_login() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_find_by_username()
            .returning(|_| Ok(Some(ada_record())));
        accounts.expect_name().return_const("mock");
        let profiles = service(accounts);

        let soup = Recipe {
            id: "4".to_string(),
            title: "Lentil Soup".to_string(),
            ingredients: vec!["lentils".to_string()],
            instructions: vec!["Simmer.".to_string()],
            image_name: None,
            cleaned_ingredients_text: "lentils".to_string(),
        };

        // Saving works while logged out
        assert!(profiles.save_recipe(&soup).await.unwrap());
        assert!(!profiles.save_recipe(&soup).await.unwrap());
        assert!(matches!(
            profiles.saved_recipes().await,
            Err(AccountError::LoginRequired)
        ));

        profiles.login("ada", "secret").await.unwrap();
        let saved = profiles.saved_recipes().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "Lentil Soup");

        let opened = profiles.saved_recipe("4").await.unwrap().unwrap();
        assert_eq!(opened.ingredients, vec!["lentils"]);
        assert_eq!(opened.instructions, vec!["Simmer."]);
        assert_eq!(profiles.saved_recipe("5").await.unwrap(), None);

        let ended = profiles.logout().await.unwrap();
        assert_eq!(ended.map(|s| s.username), Some("ada".to_string()));
        assert!(profiles.logout().await.unwrap().is_none());
        assert!(matches!(
            profiles.saved_recipe("4").await,
            Err(AccountError::LoginRequired)
        ));
    }
}
