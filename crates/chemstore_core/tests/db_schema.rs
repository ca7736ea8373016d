use chemstore_core::db::schema::TABLES;
use chemstore_core::db::{open_db, open_db_in_memory};
use chemstore_core::{Compound, CompoundStore, SqliteCompoundStore};
use rusqlite::Connection;

#[test]
fn initialize_creates_all_tables() {
    let conn = open_db_in_memory().unwrap();
    SqliteCompoundStore::new(&conn).initialize().unwrap();

    for table in TABLES {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn initialize_twice_keeps_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();
    store
        .add_compound(&Compound::new(1, "C", "methane", vec!["marsh gas".to_string()]))
        .unwrap();

    store.initialize().unwrap();

    assert_eq!(store.max_known_id().unwrap(), Some(1));
    assert!(store.name_exists("marsh gas").unwrap());
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("pubchem.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteCompoundStore::new(&conn);
        store.initialize().unwrap();
        store
            .add_compound(&Compound::new(42, "O", "oxidane", Vec::new()))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();
    assert_eq!(store.max_known_id().unwrap(), Some(42));
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
