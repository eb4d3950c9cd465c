//! Unit tests for the ticketscope database layer (connection + migrations).

use tempfile::TempDir;

use ticketscope::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use ticketscope::database::Database;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_history_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='history'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "Table 'history' should exist after migrations");
}

#[test]
fn test_migrations_create_visit_time_index() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='index' AND name='idx_history_last_visit_time'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "Index 'idx_history_last_visit_time' should exist");
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_reopen_does_not_rerun_migrations() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("history.db");

    {
        let db = Database::open(&path).expect("first open failed");
        db.connection()
            .execute(
                "INSERT INTO history (id, url, title, visit_count, last_visit_time) \
                 VALUES ('a', 'https://desk.example.com/tickets/ticketdetail?id=1', 't', 1, 5)",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).expect("second open failed");
    let rows: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    let versions: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, 1);
}

#[test]
fn test_url_is_unique() {
    let db = Database::open_in_memory().unwrap();
    let conn = db.connection();
    let insert = "INSERT INTO history (id, url, title, visit_count, last_visit_time) VALUES (?1, 'https://a.example.com', '', 1, 0)";
    conn.execute(insert, ["one"]).unwrap();
    assert!(conn.execute(insert, ["two"]).is_err());
}
