//! Compound store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist compounds, trivial names and compound-name links.
//! - Expose existence checks so ingestion can stay idempotent.
//!
//! # Invariants
//! - A compound id is stored at most once (`Compounds.id` primary key).
//! - `add_name` reuses an existing name identity instead of inserting a
//!   second row for the same string.
//! - Low-level inserts do not deduplicate; callers check existence first.
//! - Every query binds its values as parameters.

use crate::db::{initialize_schema, DbError};
use crate::model::compound::{Compound, CompoundId, NameId};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure raised by any compound store operation.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A name was inserted (or reported present) but its identity lookup came back empty.
    MissingNameIdentity(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingNameIdentity(name) => {
                write!(f, "no stored identity for trivial name `{name}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingNameIdentity(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for compound persistence.
///
/// Implementors provide the primitive operations; `add_name` and
/// `add_compound` are composed from them.
pub trait CompoundStore {
    /// Creates the backing tables when absent. Idempotent.
    fn initialize(&self) -> StoreResult<()>;
    /// Highest stored compound id, `None` when the store is empty.
    fn max_known_id(&self) -> StoreResult<Option<CompoundId>>;
    fn name_exists(&self, name: &str) -> StoreResult<bool>;
    fn id_exists(&self, id: CompoundId) -> StoreResult<bool>;
    /// Stored identity of `name`, `None` when the name is unknown.
    fn name_identity(&self, name: &str) -> StoreResult<Option<NameId>>;
    /// Inserts a name row. Does not check for an existing row.
    fn insert_name(&self, name: &str) -> StoreResult<()>;
    /// Inserts a link row. Does not check for an existing link.
    fn link_name_to_compound(&self, id: CompoundId, name_id: NameId) -> StoreResult<()>;
    /// Inserts a compound row. Fails if the id is already stored.
    fn insert_compound_record(&self, compound: &Compound) -> StoreResult<()>;

    /// Links `name` to compound `id`, creating the name first when needed.
    ///
    /// Returns `true` when a new name row was created, `false` when an
    /// existing identity was reused. The link is written in both cases,
    /// including for the empty string.
    fn add_name(&self, name: &str, id: CompoundId) -> StoreResult<bool> {
        let created = if self.name_exists(name)? {
            false
        } else {
            self.insert_name(name)?;
            true
        };

        let name_id = self
            .name_identity(name)?
            .ok_or_else(|| StoreError::MissingNameIdentity(name.to_string()))?;
        self.link_name_to_compound(id, name_id)?;
        Ok(created)
    }

    /// Stores `compound` with all its trivial names.
    ///
    /// Returns `false` without writing anything when the id is already
    /// stored. Errors from any step propagate to the caller.
    fn add_compound(&self, compound: &Compound) -> StoreResult<bool> {
        if self.id_exists(compound.id())? {
            return Ok(false);
        }
        insert_compound_with_names(self, compound)?;
        Ok(true)
    }
}

/// Inserts the compound row followed by one `add_name` per trivial name.
///
/// Returns the number of name rows newly created.
pub(crate) fn insert_compound_with_names<S>(store: &S, compound: &Compound) -> StoreResult<usize>
where
    S: CompoundStore + ?Sized,
{
    store.insert_compound_record(compound)?;

    let mut created = 0;
    for name in compound.trivial_names() {
        if store.add_name(name, compound.id())? {
            created += 1;
        }
    }
    Ok(created)
}

/// SQLite-backed compound store.
pub struct SqliteCompoundStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompoundStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CompoundStore for SqliteCompoundStore<'_> {
    fn initialize(&self) -> StoreResult<()> {
        initialize_schema(self.conn)?;
        info!("event=store_init module=repo status=ok");
        Ok(())
    }

    fn max_known_id(&self) -> StoreResult<Option<CompoundId>> {
        let max_id = self
            .conn
            .query_row("SELECT MAX(id) FROM Compounds;", [], |row| {
                row.get::<_, Option<CompoundId>>(0)
            })?;
        Ok(max_id)
    }

    fn name_exists(&self, name: &str) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Names WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn id_exists(&self, id: CompoundId) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Compounds WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn name_identity(&self, name: &str) -> StoreResult<Option<NameId>> {
        let name_id = self
            .conn
            .query_row(
                "SELECT id FROM Names WHERE name = ?1 ORDER BY id ASC LIMIT 1;",
                [name],
                |row| row.get::<_, NameId>(0),
            )
            .optional()?;
        Ok(name_id)
    }

    fn insert_name(&self, name: &str) -> StoreResult<()> {
        self.conn
            .execute("INSERT INTO Names (name) VALUES (?1);", [name])?;
        Ok(())
    }

    fn link_name_to_compound(&self, id: CompoundId, name_id: NameId) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO CompoundNameLinks (name_id, compound_id) VALUES (?1, ?2);",
            params![name_id, id],
        )?;
        Ok(())
    }

    fn insert_compound_record(&self, compound: &Compound) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO Compounds (id, preferred_name, canonical_structure)
             VALUES (?1, ?2, ?3);",
            params![
                compound.id(),
                compound.preferred_name(),
                compound.canonical_structure(),
            ],
        )?;
        Ok(())
    }

    // Record and links commit together; a failure part way leaves no rows.
    fn add_compound(&self, compound: &Compound) -> StoreResult<bool> {
        let tx = self.conn.unchecked_transaction()?;

        if self.id_exists(compound.id())? {
            debug!(
                "event=compound_add module=repo status=skipped reason=exists cid={}",
                compound.id()
            );
            return Ok(false);
        }

        let created_names = insert_compound_with_names(self, compound)?;
        tx.commit()?;

        debug!(
            "event=compound_add module=repo status=ok cid={} names={} new_names={}",
            compound.id(),
            compound.trivial_names().len(),
            created_names
        );
        Ok(true)
    }
}
