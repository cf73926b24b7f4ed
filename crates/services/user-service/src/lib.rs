//! User Service Library
//!
//! A SeaORM-backed user store with a single lookup, the service facade over
//! it, and a programmable fake database driver for testing the store.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use std::sync::Arc;

use tracing::info;

use common::AppResult;
use domain::User;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Look up one user by ID against the configured database.
pub async fn lookup_user(config: &UserServiceConfig, id: i64) -> AppResult<User> {
    let db = Database::connect(&config.database).await?;

    let user_repo = Arc::new(UserStore::new(db.into_connection()));
    let user_service = UserManager::new(user_repo);

    user_service.get_user(id).await
}

/// Check that the configured database answers.
pub async fn ping(config: &UserServiceConfig) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;
    db.ping().await?;
    info!("Database is reachable");
    Ok(())
}
