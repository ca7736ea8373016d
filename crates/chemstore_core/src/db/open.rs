//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas shared by every store connection.
//!
//! # Invariants
//! - Returned connections have a busy timeout set.
//! - Schema creation is left to `CompoundStore::initialize`.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the SQLite database file at `path`.
///
/// Missing parent directories are created first.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=file path={}",
        path.display()
    );

    let result = prepare_parent_dir(path).and_then(|()| {
        let conn = Connection::open(path)?;
        configure_connection(&conn)?;
        Ok(conn)
    });
    log_open_result("file", started_at, result)
}

/// Opens a private in-memory SQLite database.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(DbError::from)
        .and_then(|conn| {
            configure_connection(&conn)?;
            Ok(conn)
        });
    log_open_result("memory", started_at, result)
}

fn prepare_parent_dir(path: &Path) -> DbResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

fn log_open_result(
    mode: &str,
    started_at: Instant,
    result: DbResult<Connection>,
) -> DbResult<Connection> {
    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} duration_ms={}",
            mode,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
