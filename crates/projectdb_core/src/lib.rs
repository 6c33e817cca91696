//! Core schema and data access for the project store.
//! This crate owns the table definitions and every query against them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{resolve_db_path, SeedData};
pub use db::{DatabaseManager, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::project::{NewProject, ProjectColumn, ProjectInfo, ProjectSummary};
pub use model::reference::{Skill, Status};
pub use model::user::{NewUser, User};
pub use repo::project_repo::{ProjectRepository, RepoError, RepoResult, SqliteProjectRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
