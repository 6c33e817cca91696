//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open the database file, creating its parent directory when missing.
//! - Configure connection pragmas required by the schema.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`. SQLite disables foreign key
//!   enforcement per connection by default, so this runs on every open.

use super::DbResult;
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file with foreign keys enforced.
///
/// # Side effects
/// - Creates the parent directory of `path` if it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    debug!("event=db_open module=db status=start");

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_dir_create_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    }

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    if let Err(err) = configure_connection(&conn) {
        error!(
            "event=db_open module=db status=error duration_ms={} error_code=db_configure_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err.into());
    }

    debug!(
        "event=db_open module=db status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
