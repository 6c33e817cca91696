use projectdb_core::{
    DatabaseManager, DbError, NewUser, RepoError, SqliteUserRepository, User, UserRepository,
};
use tempfile::TempDir;

fn ready_repo() -> (TempDir, SqliteUserRepository) {
    let dir = tempfile::tempdir().unwrap();
    let db = DatabaseManager::new(dir.path().join("projects.db"));
    db.create_tables().unwrap();
    (dir, SqliteUserRepository::new(db))
}

#[test]
fn insert_user_allocates_id_when_not_given() {
    let (_dir, repo) = ready_repo();

    let first = repo.insert_user(&NewUser::new("alice")).unwrap();
    let second = repo.insert_user(&NewUser::new("bob")).unwrap();

    assert_ne!(first, second);
    assert_eq!(repo.get_user_id("alice").unwrap(), Some(first));
    assert_eq!(repo.get_user_id("bob").unwrap(), Some(second));
}

#[test]
fn insert_user_keeps_explicit_id_and_optional_fields() {
    let (_dir, repo) = ready_repo();
    let user = NewUser {
        email: Some("carol@example.com".to_string()),
        joined_at: Some("2024-05-01T12:00:00Z".to_string()),
        ..NewUser::new("carol").with_id(123_456_789_012)
    };

    let user_id = repo.insert_user(&user).unwrap();

    assert_eq!(user_id, 123_456_789_012);
    assert_eq!(
        repo.get_user(user_id).unwrap(),
        Some(User {
            user_id,
            username: "carol".to_string(),
            email: Some("carol@example.com".to_string()),
            joined_at: Some("2024-05-01T12:00:00Z".to_string()),
        })
    );
}

#[test]
fn duplicate_username_surfaces_engine_error() {
    let (_dir, repo) = ready_repo();
    repo.insert_user(&NewUser::new("alice")).unwrap();

    let err = repo.insert_user(&NewUser::new("alice")).unwrap_err();

    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));
}

#[test]
fn lookups_return_none_for_unknown_user() {
    let (_dir, repo) = ready_repo();

    assert_eq!(repo.get_user(1).unwrap(), None);
    assert_eq!(repo.get_user_id("nobody").unwrap(), None);
    assert_eq!(repo.delete_user(1).unwrap(), 0);
}
