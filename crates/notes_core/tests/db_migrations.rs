use notes_core::db::migrations::{latest_version, schema_version};
use notes_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

fn object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2;",
        [kind, name],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}

#[test]
fn fresh_memory_database_has_every_table_and_index() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    for table in ["tasks", "notes", "packages"] {
        assert!(object_exists(&conn, "table", table), "missing table {table}");
    }
    assert!(object_exists(&conn, "index", "idx_tasks_package_id"));
}

#[test]
fn file_database_gets_its_directory_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("home").join(".notes").join("database.sqlite");

    let conn = open_db(&path).unwrap();
    assert!(path.exists());
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
}

#[test]
fn reopening_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite");

    open_db(&path)
        .unwrap()
        .execute(
            "INSERT INTO packages (id, name, created_at, updated_at) VALUES ('p1', 'Garden', 1, 1);",
            [],
        )
        .unwrap();

    let conn = open_db(&path).unwrap();
    let names: String = conn
        .query_row("SELECT group_concat(name) FROM packages;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(names, "Garden");
}

#[test]
fn partially_upgraded_file_resumes_at_next_step() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("halfway.sqlite");

    let raw = Connection::open(&path).unwrap();
    raw.execute_batch(
        "CREATE TABLE packages (id TEXT PRIMARY KEY NOT NULL, name TEXT NOT NULL,
             description TEXT, parent_id TEXT, due_at INTEGER,
             status TEXT NOT NULL DEFAULT 'active', created_at INTEGER NOT NULL,
             updated_at INTEGER NOT NULL);
         CREATE TABLE tasks (id TEXT PRIMARY KEY NOT NULL, title TEXT NOT NULL,
             description TEXT, status TEXT NOT NULL DEFAULT 'pending',
             priority TEXT NOT NULL DEFAULT 'medium', due_at INTEGER, package_id TEXT,
             tags TEXT NOT NULL DEFAULT '[]', created_at INTEGER NOT NULL,
             updated_at INTEGER NOT NULL, completed_at INTEGER);
         CREATE TABLE notes (id TEXT PRIMARY KEY NOT NULL, title TEXT NOT NULL,
             content TEXT NOT NULL DEFAULT '', package_id TEXT,
             linked_tasks TEXT NOT NULL DEFAULT '[]', tags TEXT NOT NULL DEFAULT '[]',
             created_at INTEGER NOT NULL, updated_at INTEGER NOT NULL);
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(raw);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert!(object_exists(&conn, "index", "idx_notes_package_id"));
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    match open_db(&path) {
        Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema was opened"),
    }
}

#[test]
fn check_constraints_reject_unknown_status() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO tasks (id, title, status, priority, created_at, updated_at)
         VALUES ('t1', 'x', 'done', 'medium', 1, 1);",
        [],
    );
    assert!(result.is_err());
}
