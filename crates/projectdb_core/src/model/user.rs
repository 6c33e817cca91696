//! User rows.

use serde::{Deserialize, Serialize};

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    /// Free-form timestamp text as supplied by the caller.
    pub joined_at: Option<String>,
}

/// Insert payload for the `users` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Explicit id, e.g. an external chat account id. `None` lets SQLite
    /// allocate the next rowid.
    pub user_id: Option<i64>,
    pub username: String,
    pub email: Option<String>,
    pub joined_at: Option<String>,
}

impl NewUser {
    /// Creates a payload with only the required `username` set.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Pins the id the row will be stored under.
    pub fn with_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}
