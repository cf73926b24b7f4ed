//! Unified error handling for the user store and its callers.
//!
//! A lookup that matches no row is the `NotFound` sentinel. Every failure
//! coming out of the database driver is carried unchanged in `Database`.

use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("User not found")]
    NotFound,

    // External service errors
    #[cfg(feature = "database")]
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this is the expected "no such record" outcome rather than a fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound)
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_becomes_not_found() {
        let missing: Option<u8> = None;

        let err = missing.ok_or_not_found().unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn some_passes_through() {
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }

    #[test]
    fn config_error_is_not_a_miss() {
        let err = AppError::config("max connections must be a number");

        assert!(!err.is_not_found());
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max connections must be a number"
        );
    }

    #[cfg(feature = "database")]
    #[test]
    fn database_error_keeps_driver_message() {
        let driver = sea_orm::DbErr::Custom("connection reset".to_string());
        let expected = driver.to_string();

        let err = AppError::from(driver);
        assert!(!err.is_not_found());
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.to_string(), expected);
    }
}
