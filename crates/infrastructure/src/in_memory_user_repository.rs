use std::collections::HashMap;

use async_trait::async_trait;
use flexup_application::UserRepository;
use flexup_core::{AppError, AppResult, UserId};
use flexup_domain::{EmailAddress, UserAccount};
use tokio::sync::RwLock;


/// In-memory user repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: UserAccount) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id()) {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                user.id()
            )));
        }
        if users.values().any(|known| known.email() == user.email()) {
            return Err(AppError::Conflict(format!(
                "a user with email '{}' already exists",
                user.email()
            )));
        }

        users.insert(user.id(), user);
        Ok(())
    }

    async fn update(&self, user: UserAccount) -> AppResult<()> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id()) {
            return Err(AppError::NotFound(format!(
                "no user with id '{}'",
                user.id()
            )));
        }

        users.insert(user.id(), user);
        Ok(())
    }

    async fn find(&self, id: UserId) -> AppResult<Option<UserAccount>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<UserAccount>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }
}
