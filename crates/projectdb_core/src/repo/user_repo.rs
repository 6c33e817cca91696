//! User repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `username` is unique; a duplicate insert surfaces the engine's
//!   constraint error unchanged.
//! - Deleting a user removes its projects and their skill links through
//!   `ON DELETE CASCADE`.

use crate::db::DatabaseManager;
use crate::model::user::{NewUser, User};
use crate::repo::project_repo::RepoResult;
use log::info;
use rusqlite::{params, OptionalExtension};

/// Repository interface for user rows.
pub trait UserRepository {
    /// Inserts one user and returns its id.
    fn insert_user(&self, user: &NewUser) -> RepoResult<i64>;
    fn get_user(&self, user_id: i64) -> RepoResult<Option<User>>;
    fn get_user_id(&self, username: &str) -> RepoResult<Option<i64>>;
    /// Deletes one user and, by cascade, everything it owns.
    fn delete_user(&self, user_id: i64) -> RepoResult<usize>;
}

/// SQLite-backed user repository. Opens one connection per call.
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    db: DatabaseManager,
}

impl SqliteUserRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

impl UserRepository for SqliteUserRepository {
    fn insert_user(&self, user: &NewUser) -> RepoResult<i64> {
        let user_id = self.db.with_transaction(|conn| -> RepoResult<i64> {
            conn.execute(
                "INSERT INTO users (user_id, username, email, joined_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    user.user_id,
                    user.username.as_str(),
                    user.email.as_deref(),
                    user.joined_at.as_deref(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        info!("event=user_insert module=repo status=ok user_id={user_id}");
        Ok(user_id)
    }

    fn get_user(&self, user_id: i64) -> RepoResult<Option<User>> {
        self.db.with_connection(|conn| -> RepoResult<Option<User>> {
            let user = conn
                .query_row(
                    "SELECT user_id, username, email, joined_at FROM users WHERE user_id = ?1;",
                    [user_id],
                    |row| {
                        Ok(User {
                            user_id: row.get(0)?,
                            username: row.get(1)?,
                            email: row.get(2)?,
                            joined_at: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(user)
        })
    }

    fn get_user_id(&self, username: &str) -> RepoResult<Option<i64>> {
        self.db.with_connection(|conn| -> RepoResult<Option<i64>> {
            let user_id = conn
                .query_row(
                    "SELECT user_id FROM users WHERE username = ?1;",
                    [username],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(user_id)
        })
    }

    fn delete_user(&self, user_id: i64) -> RepoResult<usize> {
        let removed = self.db.with_transaction(|conn| -> RepoResult<usize> {
            Ok(conn.execute("DELETE FROM users WHERE user_id = ?1;", [user_id])?)
        })?;

        info!("event=user_delete module=repo status=ok user_id={user_id} removed={removed}");
        Ok(removed)
    }
}
