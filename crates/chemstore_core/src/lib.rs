//! Core ingestion logic for chemstore.
//! Fetches PubChem compounds by CID, normalizes their synonyms and stores
//! them idempotently in SQLite.

pub mod config;
pub mod db;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod names;
pub mod repo;
pub mod service;

pub use config::IngestConfig;
pub use fetch::{CompoundFetcher, FetchError, FetchResult, PubChemConfig, PubChemFetcher};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::compound::{Compound, CompoundId, NameId};
pub use names::filter_names;
pub use repo::compound_store::{CompoundStore, SqliteCompoundStore, StoreError, StoreResult};
pub use service::ingest_service::{
    CidOutcome, IngestError, IngestObserver, IngestResult, IngestService, NoopObserver, RunReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
