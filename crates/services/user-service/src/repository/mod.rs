//! Repository layer for data access.

pub mod entities;
mod user_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserStore, SELECT_USER_BY_ID};
