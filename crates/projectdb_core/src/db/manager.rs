//! Scoped-connection database manager.
//!
//! # Responsibility
//! - Hold the database file location and open a fresh connection per call.
//! - Create the schema and report which tables exist.
//! - Run caller-supplied statements with bound parameters.
//!
//! # Invariants
//! - A connection never outlives the call that opened it.
//! - Writes commit only when the whole call succeeds; any error drops the
//!   open transaction, which rolls it back.

use super::open::open_db;
use super::schema::SCHEMA_SQL;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{Connection, Params};
use std::path::{Path, PathBuf};

/// Entry point for schema setup and generic statement execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseManager {
    database: PathBuf,
}

impl DatabaseManager {
    /// Creates a manager for the database file at `database`.
    ///
    /// No connection is opened until the first operation.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
        }
    }

    /// Returns the database file this manager operates on.
    pub fn path(&self) -> &Path {
        &self.database
    }

    /// Opens a configured connection to the managed file.
    pub fn connect(&self) -> DbResult<Connection> {
        open_db(&self.database)
    }

    /// Creates all tables that do not exist yet.
    ///
    /// Safe to call on an already initialized database.
    pub fn create_tables(&self) -> DbResult<()> {
        let result = self.with_transaction(|conn| -> DbResult<()> {
            conn.execute_batch(SCHEMA_SQL)?;
            Ok(())
        });

        match &result {
            Ok(()) => info!("event=schema_create module=db status=ok"),
            Err(err) => error!("event=schema_create module=db status=error error={err}"),
        }
        result
    }

    /// Returns the names of all tables, ordered by name.
    pub fn list_tables(&self) -> DbResult<Vec<String>> {
        self.with_connection(|conn| -> DbResult<Vec<String>> {
            let mut stmt =
                conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(names)
        })
    }

    /// Executes one statement and returns the number of changed rows.
    ///
    /// With `commit = false` the statement runs inside a transaction that is
    /// rolled back afterwards, so its effects are discarded.
    pub fn execute<P: Params>(&self, sql: &str, params: P, commit: bool) -> DbResult<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(sql, params)?;
        if commit {
            tx.commit()?;
        } else {
            tx.rollback()?;
        }
        Ok(changed)
    }

    /// Executes one statement once per parameter set in a single transaction.
    ///
    /// Returns the total number of changed rows. Either every row applies or
    /// none does.
    pub fn executemany<P, I>(&self, sql: &str, rows: I) -> DbResult<usize>
    where
        P: Params,
        I: IntoIterator<Item = P>,
    {
        self.with_transaction(|conn| -> DbResult<usize> {
            let mut stmt = conn.prepare(sql)?;
            let mut changed = 0;
            for params in rows {
                changed += stmt.execute(params)?;
            }
            Ok(changed)
        })
    }

    /// Runs a query and returns every row as a vector of column values.
    pub fn fetchall<P: Params>(&self, sql: &str, params: P) -> DbResult<Vec<Vec<Value>>> {
        self.with_connection(|conn| -> DbResult<Vec<Vec<Value>>> {
            let mut stmt = conn.prepare(sql)?;
            let column_count = stmt.column_count();
            let mut rows = stmt.query(params)?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(column_count);
                for index in 0..column_count {
                    values.push(row.get::<_, Value>(index)?);
                }
                out.push(values);
            }
            Ok(out)
        })
    }

    /// Runs `f` against a fresh connection that is closed afterwards.
    pub fn with_connection<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<DbError>,
    {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Runs `f` inside one transaction on a fresh connection.
    ///
    /// Commits when `f` returns `Ok`; otherwise the transaction is dropped
    /// and rolled back.
    pub fn with_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<DbError>,
    {
        let mut conn = self.connect()?;
        let tx = conn.transaction().map_err(DbError::from)?;
        let value = f(&tx)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }
}
