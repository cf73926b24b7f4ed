//! User domain entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User domain entity.
///
/// Built from a single row of the `users` table. The password hash is opaque
/// and never leaves the process: it is skipped on serialization and redacted
/// from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub pass_hash: Vec<u8>,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    /// May be empty
    pub photo_url: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("pass_hash", &"[redacted]")
            .field("user_name", &self.user_name)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("photo_url", &self.photo_url)
            .finish()
    }
}
