//! Compound domain model.
//!
//! # Responsibility
//! - Define the canonical compound record handed from fetchers to storage.
//!
//! # Invariants
//! - `id` is the compound identity; two compounds with the same id are the
//!   same record regardless of other fields.
//! - A `Compound` is immutable after construction.
//! - `trivial_names` has already passed through `names::filter_names`.

use crate::names::filter_names;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Numeric compound identifier (PubChem CID).
pub type CompoundId = i64;

/// Identity of one stored trivial name row.
pub type NameId = i64;

/// One compound as fetched from the remote database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compound {
    id: CompoundId,
    /// Canonical SMILES.
    canonical_structure: String,
    /// IUPAC name.
    preferred_name: String,
    trivial_names: Vec<String>,
}

impl Compound {
    /// Builds a compound from already normalized trivial names.
    ///
    /// Callers holding raw synonym payloads should use [`Compound::from_raw_names`].
    pub fn new(
        id: CompoundId,
        canonical_structure: impl Into<String>,
        preferred_name: impl Into<String>,
        trivial_names: Vec<String>,
    ) -> Self {
        Self {
            id,
            canonical_structure: canonical_structure.into(),
            preferred_name: preferred_name.into(),
            trivial_names,
        }
    }

    /// Builds a compound and runs raw synonyms through the name filter.
    pub fn from_raw_names<'a, I>(
        id: CompoundId,
        canonical_structure: impl Into<String>,
        preferred_name: impl Into<String>,
        raw_names: I,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        Self::new(
            id,
            canonical_structure,
            preferred_name,
            filter_names(raw_names),
        )
    }

    pub fn id(&self) -> CompoundId {
        self.id
    }

    pub fn canonical_structure(&self) -> &str {
        &self.canonical_structure
    }

    pub fn preferred_name(&self) -> &str {
        &self.preferred_name
    }

    pub fn trivial_names(&self) -> &[String] {
        &self.trivial_names
    }
}
