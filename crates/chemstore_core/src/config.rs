//! Explicit runtime configuration for one ingestion process.
//!
//! Nothing here reads the environment; callers build an `IngestConfig` and
//! hand its parts to `open_db`, `init_logging` and `PubChemFetcher::new`.

use crate::fetch::PubChemConfig;
use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "pubchem.db";
pub const DEFAULT_RUN_COUNT: u32 = 100;
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Identifiers to attempt in one run.
    pub count: u32,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log directory. Relative paths are resolved by the caller.
    pub log_dir: PathBuf,
    pub pubchem: PubChemConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            count: DEFAULT_RUN_COUNT,
            log_level: default_log_level().to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            pubchem: PubChemConfig::default(),
        }
    }
}
