use chemstore_core::db::open_db_in_memory;
use chemstore_core::{Compound, CompoundStore, SqliteCompoundStore};
use rusqlite::{params, Connection};

fn compound(id: i64, names: &[&str]) -> Compound {
    Compound::new(
        id,
        format!("C{id}"),
        format!("compound-{id}"),
        names.iter().map(|name| name.to_string()).collect(),
    )
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn max_known_id_is_none_for_empty_store() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    assert_eq!(store.max_known_id().unwrap(), None);
}

#[test]
fn max_known_id_returns_highest_id_regardless_of_insert_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    for id in [5, 1, 9] {
        assert!(store.add_compound(&compound(id, &[])).unwrap());
    }

    assert_eq!(store.max_known_id().unwrap(), Some(9));
}

#[test]
fn add_compound_is_idempotent_per_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    let water = compound(962, &["water", "oxidane"]);
    assert!(store.add_compound(&water).unwrap());
    assert!(!store.add_compound(&water).unwrap());

    assert_eq!(count_rows(&conn, "Compounds"), 1);
    assert_eq!(count_rows(&conn, "Names"), 2);
    assert_eq!(count_rows(&conn, "CompoundNameLinks"), 2);
}

#[test]
fn add_compound_persists_record_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    let ethanol = Compound::new(702, "CCO", "ethanol", vec!["alcohol".to_string()]);
    store.add_compound(&ethanol).unwrap();

    let (preferred_name, structure): (String, String) = conn
        .query_row(
            "SELECT preferred_name, canonical_structure FROM Compounds WHERE id = ?1;",
            [702],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(preferred_name, "ethanol");
    assert_eq!(structure, "CCO");
    assert!(store.id_exists(702).unwrap());
    assert!(!store.id_exists(703).unwrap());
}

#[test]
fn shared_trivial_name_is_stored_once_and_linked_twice() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    store.add_compound(&compound(1, &["shared", "first"])).unwrap();
    store.add_compound(&compound(2, &["shared", "second"])).unwrap();

    let shared_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM Names WHERE name = ?1;",
            ["shared"],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(shared_rows, 1);

    let shared_id = store.name_identity("shared").unwrap().unwrap();
    let linked_compounds: Vec<i64> = {
        let mut stmt = conn
            .prepare(
                "SELECT compound_id FROM CompoundNameLinks WHERE name_id = ?1 ORDER BY compound_id;",
            )
            .unwrap();
        let rows = stmt
            .query_map(params![shared_id], |row| row.get(0))
            .unwrap();
        rows.map(Result::unwrap).collect()
    };
    assert_eq!(linked_compounds, vec![1, 2]);
    assert_eq!(count_rows(&conn, "Names"), 3);
    assert_eq!(count_rows(&conn, "CompoundNameLinks"), 4);
}

#[test]
fn add_name_reports_creation_then_reuse() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    assert!(!store.name_exists("caffeine").unwrap());
    assert!(store.add_name("caffeine", 2519).unwrap());
    assert!(store.name_exists("caffeine").unwrap());
    assert!(!store.add_name("caffeine", 2519).unwrap());

    assert_eq!(count_rows(&conn, "Names"), 1);
    assert_eq!(count_rows(&conn, "CompoundNameLinks"), 2);
}

#[test]
fn add_name_links_empty_string() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    assert!(store.add_name("", 3).unwrap());

    assert!(store.name_identity("").unwrap().is_some());
    assert_eq!(count_rows(&conn, "CompoundNameLinks"), 1);
}

#[test]
fn low_level_inserts_do_not_deduplicate() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    store.insert_name("twice").unwrap();
    store.insert_name("twice").unwrap();
    let first_id = store.name_identity("twice").unwrap().unwrap();
    store.link_name_to_compound(10, first_id).unwrap();
    store.link_name_to_compound(10, first_id).unwrap();

    assert_eq!(count_rows(&conn, "Names"), 2);
    assert_eq!(count_rows(&conn, "CompoundNameLinks"), 2);
    let min_id: i64 = conn
        .query_row("SELECT MIN(id) FROM Names;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(first_id, min_id);
}

#[test]
fn insert_compound_record_rejects_duplicate_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    store.insert_compound_record(&compound(4, &[])).unwrap();
    assert!(store.insert_compound_record(&compound(4, &[])).is_err());
}

#[test]
fn names_with_quotes_and_sql_syntax_are_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();

    let tricky = r#"name"); DROP TABLE Names; --"#;
    store.add_compound(&compound(7, &[tricky, "it's"])).unwrap();

    assert!(store.name_exists(tricky).unwrap());
    assert!(store.name_exists("it's").unwrap());
    assert_eq!(count_rows(&conn, "Names"), 2);
}

#[test]
fn failed_name_link_rolls_back_compound_record() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCompoundStore::new(&conn);
    store.initialize().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_links BEFORE INSERT ON CompoundNameLinks
         BEGIN SELECT RAISE(ABORT, 'links disabled'); END;",
    )
    .unwrap();

    assert!(store.add_compound(&compound(11, &["doomed"])).is_err());

    assert!(!store.id_exists(11).unwrap());
    assert_eq!(count_rows(&conn, "Names"), 0);
}
