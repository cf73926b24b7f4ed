//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::User;

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: i64) -> AppResult<User> {
        tracing::debug!(user_id = id, "Looking up user");

        let result = self.repo.get_by_id(id).await;
        match &result {
            Ok(_) => {}
            // A miss is an expected outcome, not a fault
            Err(AppError::NotFound) => tracing::debug!(user_id = id, "User not found"),
            Err(e) => tracing::error!(user_id = id, error = %e, "User lookup failed"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    use super::*;
    use crate::repository::MockUserRepository;

    fn create_test_user(id: i64) -> User {
        User {
            id,
            email: "test@test.com".to_string(),
            pass_hash: b"passhash123".to_vec(),
            user_name: "username".to_string(),
            first_name: "firstname".to_string(),
            last_name: "lastname".to_string(),
            photo_url: "photourl".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(1i64))
            .times(1)
            .returning(|id| Ok(create_test_user(id)));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(1).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), create_test_user(1));
    }

    #[tokio::test]
    async fn test_get_user_large_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(1234567890i64))
            .times(1)
            .returning(|id| Ok(create_test_user(id)));

        let service = UserManager::new(Arc::new(repo));
        let user = service.get_user(1234567890).await.unwrap();

        assert_eq!(user.id, 1234567890);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(2i64))
            .times(1)
            .returning(|_| Err(AppError::NotFound));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(2).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_get_user_database_error_passes_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|_| Err(AppError::Database(DbErr::Custom("pool closed".to_string()))));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(1).await;

        match result {
            Err(AppError::Database(DbErr::Custom(msg))) => assert_eq!(msg, "pool closed"),
            other => panic!("expected database error, got {other:?}"),
        }
    }
}
