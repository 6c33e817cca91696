//! Manual runner for the project store.
//!
//! # Responsibility
//! - Create any missing tables in the configured database.
//! - Print the resulting table list for a quick local sanity check.
//!
//! Usage: `projectdb [DATABASE_PATH]`. Without an argument the path comes
//! from `PROJECTDB_PATH`, defaulting to `projects.db`.

use log::{error, info};
use projectdb_core::config::LOG_LEVEL_ENV;
use projectdb_core::{
    core_version, default_log_level, init_logging, resolve_db_path, DatabaseManager, LogTarget,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    if let Err(err) = init_logging(&level, LogTarget::Stderr) {
        eprintln!("logging disabled: {err}");
    }
    info!("{}", start_event());

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(resolve_db_path);

    match run(DatabaseManager::new(path)) {
        Ok(tables) => {
            println!("Tables in database:");
            for table in tables {
                println!(" - {table}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("projectdb: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_event() -> String {
    format!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    )
}

fn run(db: DatabaseManager) -> projectdb_core::DbResult<Vec<String>> {
    db.create_tables()?;
    db.list_tables()
}

#[cfg(test)]
mod tests {
    use super::{run, start_event};
    use projectdb_core::db::schema::TABLE_NAMES;
    use projectdb_core::{core_version, DatabaseManager};

    #[test]
    fn start_event_reports_core_version() {
        let event = start_event();
        assert!(event.starts_with("event=cli_start"));
        assert!(event.ends_with(&format!("version={}", core_version())));
    }

    #[test]
    fn run_creates_tables_and_lists_them() {
        let dir = tempfile::tempdir().unwrap();
        let db = DatabaseManager::new(dir.path().join("cli.db"));

        assert_eq!(run(db.clone()).unwrap(), TABLE_NAMES);
        assert_eq!(run(db).unwrap(), TABLE_NAMES);
    }
}
