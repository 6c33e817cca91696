//! Project rows and the updatable-column allow-list.
//!
//! # Invariants
//! - `ProjectColumn` is the only source of column names that may be
//!   formatted into SQL text. Column identifiers cannot be bound as
//!   parameters, so every other value goes through placeholders.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Insert payload for the `projects` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub user_id: Option<i64>,
    pub project_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status_id: Option<i64>,
}

impl NewProject {
    /// Creates a payload owned by `user_id` with only the name set.
    pub fn new(user_id: i64, project_name: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            project_name: project_name.into(),
            ..Self::default()
        }
    }
}

/// Row returned by `get_projects`: one project with its status name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: i64,
    pub project_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    /// `None` when the project has no status or the status was deleted.
    pub status_name: Option<String>,
}

/// Row returned by `get_project_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status_name: Option<String>,
}

/// Columns of `projects` that may be changed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectColumn {
    ProjectName,
    Description,
    Url,
    StatusId,
}

impl ProjectColumn {
    pub const ALL: [ProjectColumn; 4] = [
        Self::ProjectName,
        Self::Description,
        Self::Url,
        Self::StatusId,
    ];

    /// Resolves a raw column name against the allow-list.
    ///
    /// Matching is exact: no trimming, no case folding.
    pub fn parse(column: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_sql() == column)
    }

    /// Column identifier as it appears in the schema.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::ProjectName => "project_name",
            Self::Description => "description",
            Self::Url => "url",
            Self::StatusId => "status_id",
        }
    }
}

impl Display for ProjectColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}
