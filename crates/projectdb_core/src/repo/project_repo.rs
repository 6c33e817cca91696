//! Project, skill and status repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the CRUD surface over `projects`, `skills`, `status` and
//!   `project_skills`.
//! - Seed reference data idempotently.
//!
//! # Invariants
//! - Name lookups keep their historical miss convention: `get_project_id`
//!   and `insert_skill` fail with `NotFound`, `get_status_id` returns `None`.
//! - `update_projects` validates the column name before any SQL runs.
//! - Skill links are written with insert-or-ignore; re-linking is not an error.

use crate::config::SeedData;
use crate::db::{DatabaseManager, DbError};
use crate::model::project::{NewProject, ProjectColumn, ProjectInfo, ProjectSummary};
use crate::model::reference::{Skill, Status};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for project store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Engine error, passed through unchanged.
    Db(DbError),
    /// A name-to-id lookup had no match.
    NotFound { entity: &'static str, key: String },
    /// Column name outside the updatable allow-list.
    InvalidColumn(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::InvalidColumn(column) => write!(f, "invalid column: `{column}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidColumn(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for projects and their reference data.
pub trait ProjectRepository {
    /// Inserts the seed skills and statuses, skipping rows that exist.
    fn default_insert(&self, seed: &SeedData) -> RepoResult<()>;
    /// Inserts all rows in one transaction and returns the number inserted.
    fn insert_project(&self, rows: &[NewProject]) -> RepoResult<usize>;
    /// Links a skill to the user's project, both resolved by name.
    fn insert_skill(&self, user_id: i64, project_name: &str, skill_name: &str) -> RepoResult<()>;
    fn get_statuses(&self) -> RepoResult<Vec<Status>>;
    /// Returns `None` when no status has this name.
    fn get_status_id(&self, status_name: &str) -> RepoResult<Option<i64>>;
    fn get_projects(&self, user_id: i64) -> RepoResult<Vec<ProjectSummary>>;
    fn get_project_id(&self, project_name: &str, user_id: i64) -> RepoResult<i64>;
    fn get_skills(&self) -> RepoResult<Vec<Skill>>;
    /// Skill names of every project called `project_name`, joined by `", "`.
    fn get_project_skills(&self, project_name: &str) -> RepoResult<String>;
    fn get_project_info(&self, user_id: i64, project_name: &str) -> RepoResult<Vec<ProjectInfo>>;
    /// Sets one allow-listed column of one project and returns changed rows.
    fn update_projects(
        &self,
        column: &str,
        value: &dyn ToSql,
        user_id: i64,
        project_id: i64,
    ) -> RepoResult<usize>;
    fn delete_project(&self, user_id: i64, project_id: i64) -> RepoResult<usize>;
    fn delete_skill(&self, project_id: i64, skill_id: i64) -> RepoResult<usize>;
    fn delete_status(&self, status_id: i64) -> RepoResult<usize>;
}

/// SQLite-backed project repository. Opens one connection per call.
#[derive(Debug, Clone)]
pub struct SqliteProjectRepository {
    db: DatabaseManager,
}

impl SqliteProjectRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }
}

impl ProjectRepository for SqliteProjectRepository {
    fn default_insert(&self, seed: &SeedData) -> RepoResult<()> {
        let (skills, statuses) = self.db.with_transaction(|conn| -> RepoResult<(usize, usize)> {
            let mut skills = 0;
            let mut stmt = conn.prepare("INSERT OR IGNORE INTO skills (skill_name) VALUES (?1);")?;
            for name in seed.skills {
                skills += stmt.execute([name])?;
            }

            let mut statuses = 0;
            let mut stmt =
                conn.prepare("INSERT OR IGNORE INTO status (status_name) VALUES (?1);")?;
            for name in seed.statuses {
                statuses += stmt.execute([name])?;
            }
            Ok((skills, statuses))
        })?;

        info!("event=seed_insert module=repo status=ok skills_added={skills} statuses_added={statuses}");
        Ok(())
    }

    fn insert_project(&self, rows: &[NewProject]) -> RepoResult<usize> {
        let inserted = self.db.with_transaction(|conn| -> RepoResult<usize> {
            let mut stmt = conn.prepare(
                "INSERT INTO projects (user_id, project_name, description, url, status_id)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            let mut inserted = 0;
            for row in rows {
                inserted += stmt.execute(params![
                    row.user_id,
                    row.project_name.as_str(),
                    row.description.as_deref(),
                    row.url.as_deref(),
                    row.status_id,
                ])?;
            }
            Ok(inserted)
        })?;

        info!("event=project_insert module=repo status=ok rows={inserted}");
        Ok(inserted)
    }

    fn insert_skill(&self, user_id: i64, project_name: &str, skill_name: &str) -> RepoResult<()> {
        self.db.with_transaction(|conn| -> RepoResult<()> {
            let project_id = find_project_id(conn, project_name, user_id)?
                .ok_or_else(|| not_found("project", project_name))?;
            let skill_id = conn
                .query_row(
                    "SELECT skill_id FROM skills WHERE skill_name = ?1;",
                    [skill_name],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?
                .ok_or_else(|| not_found("skill", skill_name))?;

            let added = conn.execute(
                "INSERT OR IGNORE INTO project_skills (project_id, skill_id) VALUES (?1, ?2);",
                params![project_id, skill_id],
            )?;
            info!(
                "event=skill_link module=repo status=ok project_id={project_id} skill_id={skill_id} added={added}"
            );
            Ok(())
        })
    }

    fn get_statuses(&self) -> RepoResult<Vec<Status>> {
        self.db.with_connection(|conn| -> RepoResult<Vec<Status>> {
            let mut stmt =
                conn.prepare("SELECT status_id, status_name FROM status ORDER BY status_id;")?;
            let statuses = stmt
                .query_map([], |row| {
                    Ok(Status {
                        status_id: row.get(0)?,
                        status_name: row.get(1)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(statuses)
        })
    }

    fn get_status_id(&self, status_name: &str) -> RepoResult<Option<i64>> {
        self.db.with_connection(|conn| -> RepoResult<Option<i64>> {
            let status_id = conn
                .query_row(
                    "SELECT status_id FROM status WHERE status_name = ?1;",
                    [status_name],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(status_id)
        })
    }

    fn get_projects(&self, user_id: i64) -> RepoResult<Vec<ProjectSummary>> {
        self.db.with_connection(|conn| -> RepoResult<Vec<ProjectSummary>> {
            let mut stmt = conn.prepare(
                "SELECT
                    projects.project_id,
                    projects.project_name,
                    projects.description,
                    projects.url,
                    status.status_name
                 FROM projects
                 LEFT JOIN status ON projects.status_id = status.status_id
                 WHERE projects.user_id = ?1
                 ORDER BY projects.project_id;",
            )?;
            let projects = stmt
                .query_map([user_id], |row| {
                    Ok(ProjectSummary {
                        project_id: row.get(0)?,
                        project_name: row.get(1)?,
                        description: row.get(2)?,
                        url: row.get(3)?,
                        status_name: row.get(4)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(projects)
        })
    }

    fn get_project_id(&self, project_name: &str, user_id: i64) -> RepoResult<i64> {
        self.db.with_connection(|conn| -> RepoResult<i64> {
            find_project_id(conn, project_name, user_id)?
                .ok_or_else(|| not_found("project", project_name))
        })
    }

    fn get_skills(&self) -> RepoResult<Vec<Skill>> {
        self.db.with_connection(|conn| -> RepoResult<Vec<Skill>> {
            let mut stmt =
                conn.prepare("SELECT skill_id, skill_name FROM skills ORDER BY skill_id;")?;
            let skills = stmt
                .query_map([], |row| {
                    Ok(Skill {
                        skill_id: row.get(0)?,
                        skill_name: row.get(1)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(skills)
        })
    }

    fn get_project_skills(&self, project_name: &str) -> RepoResult<String> {
        // No user filter: same-named projects of different users are merged.
        self.db.with_connection(|conn| -> RepoResult<String> {
            let mut stmt = conn.prepare(
                "SELECT skills.skill_name
                 FROM projects
                 JOIN project_skills ON projects.project_id = project_skills.project_id
                 JOIN skills ON skills.skill_id = project_skills.skill_id
                 WHERE projects.project_name = ?1
                 ORDER BY project_skills.rowid;",
            )?;
            let names = stmt
                .query_map([project_name], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(names.join(", "))
        })
    }

    fn get_project_info(&self, user_id: i64, project_name: &str) -> RepoResult<Vec<ProjectInfo>> {
        self.db.with_connection(|conn| -> RepoResult<Vec<ProjectInfo>> {
            let mut stmt = conn.prepare(
                "SELECT
                    projects.project_name,
                    projects.description,
                    projects.url,
                    status.status_name
                 FROM projects
                 LEFT JOIN status ON status.status_id = projects.status_id
                 WHERE projects.user_id = ?1 AND projects.project_name = ?2
                 ORDER BY projects.project_id;",
            )?;
            let rows = stmt
                .query_map(params![user_id, project_name], |row| {
                    Ok(ProjectInfo {
                        project_name: row.get(0)?,
                        description: row.get(1)?,
                        url: row.get(2)?,
                        status_name: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    fn update_projects(
        &self,
        column: &str,
        value: &dyn ToSql,
        user_id: i64,
        project_id: i64,
    ) -> RepoResult<usize> {
        let Some(column) = ProjectColumn::parse(column) else {
            warn!("event=project_update module=repo status=rejected error_code=invalid_column");
            return Err(RepoError::InvalidColumn(column.to_string()));
        };

        let sql = format!(
            "UPDATE projects SET {} = ?1 WHERE user_id = ?2 AND project_id = ?3;",
            column.as_sql()
        );
        let changed = self.db.with_transaction(|conn| -> RepoResult<usize> {
            Ok(conn.execute(&sql, params![value, user_id, project_id])?)
        })?;

        info!(
            "event=project_update module=repo status=ok column={column} project_id={project_id} changed={changed}"
        );
        Ok(changed)
    }

    fn delete_project(&self, user_id: i64, project_id: i64) -> RepoResult<usize> {
        let removed = self.db.with_transaction(|conn| -> RepoResult<usize> {
            Ok(conn.execute(
                "DELETE FROM projects WHERE user_id = ?1 AND project_id = ?2;",
                params![user_id, project_id],
            )?)
        })?;

        info!("event=project_delete module=repo status=ok project_id={project_id} removed={removed}");
        Ok(removed)
    }

    fn delete_skill(&self, project_id: i64, skill_id: i64) -> RepoResult<usize> {
        let removed = self.db.with_transaction(|conn| -> RepoResult<usize> {
            Ok(conn.execute(
                "DELETE FROM project_skills WHERE project_id = ?1 AND skill_id = ?2;",
                params![project_id, skill_id],
            )?)
        })?;

        info!(
            "event=skill_unlink module=repo status=ok project_id={project_id} skill_id={skill_id} removed={removed}"
        );
        Ok(removed)
    }

    fn delete_status(&self, status_id: i64) -> RepoResult<usize> {
        let removed = self.db.with_transaction(|conn| -> RepoResult<usize> {
            Ok(conn.execute("DELETE FROM status WHERE status_id = ?1;", [status_id])?)
        })?;

        info!("event=status_delete module=repo status=ok status_id={status_id} removed={removed}");
        Ok(removed)
    }
}

fn find_project_id(
    conn: &Connection,
    project_name: &str,
    user_id: i64,
) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT project_id FROM projects
         WHERE project_name = ?1 AND user_id = ?2
         ORDER BY project_id
         LIMIT 1;",
        params![project_name, user_id],
        |row| row.get(0),
    )
    .optional()
}

fn not_found(entity: &'static str, key: &str) -> RepoError {
    RepoError::NotFound {
        entity,
        key: key.to_string(),
    }
}
