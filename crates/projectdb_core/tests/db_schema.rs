use projectdb_core::db::schema::TABLE_NAMES;
use projectdb_core::{DatabaseManager, DbError};
use rusqlite::types::Value;
use rusqlite::{params, ErrorCode};
use tempfile::TempDir;

fn fresh_manager() -> (TempDir, DatabaseManager) {
    let dir = tempfile::tempdir().unwrap();
    let db = DatabaseManager::new(dir.path().join("projects.db"));
    (dir, db)
}

fn ready_manager() -> (TempDir, DatabaseManager) {
    let (dir, db) = fresh_manager();
    db.create_tables().unwrap();
    (dir, db)
}

fn assert_constraint_violation(err: DbError) {
    match err {
        DbError::Sqlite(rusqlite::Error::SqliteFailure(failure, _)) => {
            assert_eq!(failure.code, ErrorCode::ConstraintViolation);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fresh_database_has_no_tables() {
    let (_dir, db) = fresh_manager();
    assert!(db.list_tables().unwrap().is_empty());
}

#[test]
fn create_tables_creates_all_five_tables_in_name_order() {
    let (_dir, db) = ready_manager();
    assert_eq!(db.list_tables().unwrap(), TABLE_NAMES);
}

#[test]
fn create_tables_twice_keeps_schema_and_data() {
    let (_dir, db) = ready_manager();
    db.execute(
        "INSERT INTO users (username) VALUES (?1);",
        ["alice"],
        true,
    )
    .unwrap();

    db.create_tables().unwrap();

    assert_eq!(db.list_tables().unwrap(), TABLE_NAMES);
    let rows = db.fetchall("SELECT username FROM users;", []).unwrap();
    assert_eq!(rows, vec![vec![Value::Text("alice".to_string())]]);
}

#[test]
fn create_tables_creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let db = DatabaseManager::new(dir.path().join("nested").join("store").join("projects.db"));

    db.create_tables().unwrap();

    assert!(db.path().exists());
}

#[test]
fn foreign_keys_are_enforced_on_every_connection() {
    let (_dir, db) = ready_manager();

    let err = db
        .execute(
            "INSERT INTO projects (user_id, project_name) VALUES (?1, ?2);",
            params![404, "orphan"],
            true,
        )
        .unwrap_err();

    assert_constraint_violation(err);
}

#[test]
fn execute_with_commit_persists_changes() {
    let (_dir, db) = ready_manager();

    let changed = db
        .execute("INSERT INTO status (status_name) VALUES (?1);", ["Draft"], true)
        .unwrap();

    assert_eq!(changed, 1);
    let rows = db.fetchall("SELECT status_name FROM status;", []).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn execute_without_commit_discards_changes() {
    let (_dir, db) = ready_manager();

    let changed = db
        .execute("INSERT INTO status (status_name) VALUES (?1);", ["Draft"], false)
        .unwrap();

    assert_eq!(changed, 1);
    assert!(db.fetchall("SELECT * FROM status;", []).unwrap().is_empty());
}

#[test]
fn executemany_applies_every_parameter_set() {
    let (_dir, db) = ready_manager();

    let changed = db
        .executemany(
            "INSERT INTO skills (skill_name) VALUES (?1);",
            [["Rust"], ["Go"], ["Zig"]],
        )
        .unwrap();

    assert_eq!(changed, 3);
    let rows = db
        .fetchall("SELECT skill_name FROM skills ORDER BY skill_name;", [])
        .unwrap();
    let names: Vec<Value> = rows.into_iter().flatten().collect();
    assert_eq!(
        names,
        vec![
            Value::Text("Go".to_string()),
            Value::Text("Rust".to_string()),
            Value::Text("Zig".to_string()),
        ]
    );
}

#[test]
fn executemany_rolls_back_all_rows_on_failure() {
    let (_dir, db) = ready_manager();

    let err = db
        .executemany(
            "INSERT INTO skills (skill_name) VALUES (?1);",
            [["Rust"], ["Rust"]],
        )
        .unwrap_err();

    assert_constraint_violation(err);
    assert!(db.fetchall("SELECT * FROM skills;", []).unwrap().is_empty());
}

#[test]
fn fetchall_returns_positional_values_including_nulls() {
    let (_dir, db) = ready_manager();
    db.execute(
        "INSERT INTO users (user_id, username, email) VALUES (?1, ?2, ?3);",
        params![7, "bob", Option::<String>::None],
        true,
    )
    .unwrap();

    let rows = db
        .fetchall(
            "SELECT user_id, username, email FROM users WHERE user_id = ?1;",
            [7],
        )
        .unwrap();

    assert_eq!(
        rows,
        vec![vec![
            Value::Integer(7),
            Value::Text("bob".to_string()),
            Value::Null,
        ]]
    );
}

#[test]
fn bound_parameters_are_not_interpreted_as_sql() {
    let (_dir, db) = ready_manager();
    let hostile = "x'); DROP TABLE users; --";

    db.execute("INSERT INTO users (username) VALUES (?1);", [hostile], true)
        .unwrap();

    assert_eq!(db.list_tables().unwrap(), TABLE_NAMES);
    let rows = db
        .fetchall("SELECT username FROM users WHERE username = ?1;", [hostile])
        .unwrap();
    assert_eq!(rows.len(), 1);
}
