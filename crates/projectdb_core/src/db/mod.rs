//! SQLite storage bootstrap and generic statement helpers.
//!
//! # Responsibility
//! - Open and configure one SQLite connection per operation.
//! - Own the table definitions and the idempotent `create_tables` entry point.
//! - Provide bound-parameter `execute`/`executemany`/`fetchall` helpers.
//!
//! # Invariants
//! - Every connection handed out has `foreign_keys=ON`.
//! - Every write runs in its own transaction; nothing spans two calls.
//! - Values are always bound, never formatted into statement text.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod manager;
mod open;
pub mod schema;

pub use manager::DatabaseManager;
pub use open::open_db;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "database file error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
