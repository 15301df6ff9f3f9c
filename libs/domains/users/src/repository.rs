use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// Email comparisons are byte-for-byte: addresses are unique as stored,
/// not case-folded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> UserResult<bool>;

    /// Replace an existing user record
    async fn update(&self, user: User) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn update(&self, user: User) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Ok(None);
        }
        users.insert(user.id, user.clone());
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new("Jane".to_string(), email.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("Jane@Example.com")).await.unwrap();

        assert!(repo.email_exists("Jane@Example.com").await.unwrap());
        assert!(!repo.email_exists("jane@example.com").await.unwrap());
        assert!(repo
            .get_by_email("jane@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();
        let ghost = user("ghost@example.com");

        let result = repo.update(ghost).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_replaces_the_record() {
        let repo = InMemoryUserRepository::new();
        let mut u = repo.create(user("jane@example.com")).await.unwrap();

        u.name = "Janet".to_string();
        let updated = repo.update(u.clone()).await.unwrap().unwrap();
        assert_eq!(updated.name, "Janet");

        let fetched = repo.get_by_id(u.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Janet");
    }
}
