//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Statement};

use super::entities::user::Entity as UserEntity;
use common::{AppResult, OptionExt};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Lookup of a single user by primary key. `$1` is the id.
pub const SELECT_USER_BY_ID: &str = "SELECT id, email, pass_hash, user_name, first_name, last_name, photo_url FROM users WHERE id = $1";

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID.
    ///
    /// Returns `AppError::NotFound` when no row matches; driver failures are
    /// returned as `AppError::Database` untouched.
    async fn get_by_id(&self, id: i64) -> AppResult<User>;
}

/// Concrete implementation of UserRepository over a SeaORM connection.
///
/// Any `ConnectionTrait` works: a pooled `DatabaseConnection` in production,
/// the fake connection from `testing` in store tests.
pub struct UserStore<C = DatabaseConnection> {
    db: C,
}

impl<C> UserStore<C> {
    /// Create new repository instance
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C> UserRepository for UserStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            SELECT_USER_BY_ID,
            [id.into()],
        );

        let model = UserEntity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await?;

        model.map(User::from).ok_or_not_found()
    }
}
