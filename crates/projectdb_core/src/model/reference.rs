//! Reference data rows: project statuses and skills.

use serde::{Deserialize, Serialize};

/// One row of the `status` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status_id: i64,
    pub status_name: String,
}

/// One row of the `skills` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: i64,
    pub skill_name: String,
}
