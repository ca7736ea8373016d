//! Compound store schema.
//!
//! Three relations, no foreign keys: referential integrity between
//! `CompoundNameLinks` and the other two tables is kept by the store's write
//! path, not by SQLite.

use super::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Table names created by [`initialize_schema`].
pub const TABLES: [&str; 3] = ["Compounds", "Names", "CompoundNameLinks"];

/// Creates the compound tables when absent. Safe to call on every startup.
pub fn initialize_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
