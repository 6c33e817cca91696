//! Runtime configuration: database location and seed reference data.
//!
//! # Responsibility
//! - Resolve the database file path from the environment.
//! - Hold the reference rows inserted by `default_insert` as explicit
//!   constants rather than mutable module state.

use std::path::PathBuf;

/// Environment variable that overrides the database file path.
pub const DB_PATH_ENV: &str = "PROJECTDB_PATH";
/// Environment variable read by the CLI for its log level.
pub const LOG_LEVEL_ENV: &str = "PROJECTDB_LOG";
/// Database file used when no override is set.
pub const DEFAULT_DB_FILE_NAME: &str = "projects.db";

/// Resolves the database path from `PROJECTDB_PATH`, falling back to
/// `projects.db` in the working directory.
pub fn resolve_db_path() -> PathBuf {
    db_path_from(std::env::var(DB_PATH_ENV).ok().as_deref())
}

fn db_path_from(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_DB_FILE_NAME),
    }
}

/// Reference rows seeded into `skills` and `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedData {
    pub skills: &'static [&'static str],
    pub statuses: &'static [&'static str],
}

impl SeedData {
    pub const DEFAULT: SeedData = SeedData {
        skills: &["Python", "SQL", "API", "Discord"],
        statuses: &[
            "Pembuatan Prototipe",
            "Dalam Pengembangan",
            "Selesai, siap digunakan",
            "Diperbarui",
            "Selesai, tapi tidak sedang dilanjutkan",
        ],
    };
}

impl Default for SeedData {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::{db_path_from, SeedData, DEFAULT_DB_FILE_NAME};
    use std::collections::HashSet;
    use std::path::PathBuf;

    #[test]
    fn db_path_falls_back_when_unset_or_blank() {
        assert_eq!(db_path_from(None), PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(db_path_from(Some("   ")), PathBuf::from(DEFAULT_DB_FILE_NAME));
    }

    #[test]
    fn db_path_uses_trimmed_override() {
        assert_eq!(
            db_path_from(Some(" /var/lib/projectdb/bot.db \n")),
            PathBuf::from("/var/lib/projectdb/bot.db")
        );
    }

    #[test]
    fn default_seed_matches_bot_reference_names() {
        assert_eq!(SeedData::DEFAULT.skills, ["Python", "SQL", "API", "Discord"]);
        assert_eq!(
            SeedData::DEFAULT.statuses,
            [
                "Pembuatan Prototipe",
                "Dalam Pengembangan",
                "Selesai, siap digunakan",
                "Diperbarui",
                "Selesai, tapi tidak sedang dilanjutkan",
            ]
        );
    }

    #[test]
    fn default_seed_has_no_duplicates() {
        let seed = SeedData::default();
        let skills: HashSet<_> = seed.skills.iter().collect();
        let statuses: HashSet<_> = seed.statuses.iter().collect();
        assert_eq!(skills.len(), seed.skills.len());
        assert_eq!(statuses.len(), seed.statuses.len());
    }
}
