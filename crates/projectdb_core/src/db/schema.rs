//! Table definitions for the project store.
//!
//! # Invariants
//! - Every statement is `CREATE TABLE IF NOT EXISTS`, so applying the schema
//!   to an existing database is a no-op.
//! - Deleting a user cascades to its projects; deleting a status nulls
//!   `projects.status_id`; deleting a project or skill drops its links.
//! - `project_skills` declares `UNIQUE (project_id, skill_id)`. Without it
//!   `INSERT OR IGNORE` has nothing to conflict on and re-linking a skill
//!   would store a duplicate pair.
//! - `skills.skill_name` and `status.status_name` are `UNIQUE` for the same
//!   reason: reseeding reference data must not add rows.

/// Full DDL applied by [`crate::db::DatabaseManager::create_tables`].
pub const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables created by [`SCHEMA_SQL`], in lexicographic order.
pub const TABLE_NAMES: &[&str] = &["project_skills", "projects", "skills", "status", "users"];
