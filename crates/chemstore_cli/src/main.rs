//! Ingestion entry point.
//!
//! # Responsibility
//! - Build an `IngestConfig` from optional positional arguments.
//! - Wire SQLite store, PubChem fetcher and terminal progress together.
//!
//! Usage: `chemstore [count] [db_path]`

use chemstore_core::{
    init_logging, CidOutcome, CompoundId, IngestConfig, IngestObserver, IngestService,
    PubChemFetcher, RunReport, SqliteCompoundStore,
};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Prints one status line per identifier and the final summary.
struct TerminalProgress;

impl IngestObserver for TerminalProgress {
    fn run_started(&mut self, start_id: CompoundId, count: u32) {
        println!("Run CIDs starting...");
        println!("From: {start_id}, Count: {count}\n");
    }

    fn cid_finished(&mut self, id: CompoundId, outcome: &CidOutcome) {
        match outcome {
            CidOutcome::Added => println!("CID {id}  {GREEN}OK{RESET}"),
            CidOutcome::StorageFailed(reason) => {
                println!("{RED}Error during writing compound to database: {reason}{RESET}");
                println!("CID {id}  {YELLOW}was not added{RESET}");
            }
            CidOutcome::FetchFailed(_) | CidOutcome::AlreadyPresent => {
                println!("CID {id}  {YELLOW}was not added{RESET}")
            }
        }
    }

    fn run_finished(&mut self, report: &RunReport) {
        let not_added = report.not_added_count();
        let not_added_color = if not_added == 0 { GREEN } else { RED };
        println!("\nRun CIDs finished");
        println!(
            "OK: {GREEN}{}{RESET}, Not added: {not_added_color}{not_added}{RESET}",
            report.added_count()
        );
        if not_added > 0 {
            println!("\nBroken CIDs:\n{:?}", report.not_added);
        }
    }
}

fn main() -> ExitCode {
    let config = match config_from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: chemstore [count] [db_path]");
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("{RED}{err}{RESET}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &IngestConfig) -> Result<RunReport, Box<dyn Error>> {
    let log_dir = std::env::current_dir()?.join(&config.log_dir);
    if let Err(message) = init_logging(&config.log_level, &log_dir) {
        eprintln!("logging disabled: {message}");
    }

    let conn = chemstore_core::db::open_db(&config.db_path)?;
    let store = SqliteCompoundStore::new(&conn);
    let fetcher = PubChemFetcher::new(&config.pubchem)?;
    let service = IngestService::new(store, fetcher);

    let report = service.run_with_observer(config.count, &mut TerminalProgress)?;
    Ok(report)
}

fn config_from_args(mut args: impl Iterator<Item = String>) -> Result<IngestConfig, String> {
    let mut config = IngestConfig::default();
    if let Some(count) = args.next() {
        config.count = count
            .parse()
            .map_err(|_| format!("invalid count `{count}`"))?;
    }
    if let Some(db_path) = args.next() {
        config.db_path = PathBuf::from(db_path);
    }
    if let Some(extra) = args.next() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::config_from_args;
    use std::path::Path;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let config = config_from_args(args(&[])).unwrap();
        assert_eq!(config.count, 100);
        assert_eq!(config.db_path, Path::new("pubchem.db"));
    }

    #[test]
    fn positional_arguments_override_count_and_path() {
        let config = config_from_args(args(&["25", "data/compounds.db"])).unwrap();
        assert_eq!(config.count, 25);
        assert_eq!(config.db_path, Path::new("data/compounds.db"));
    }

    #[test]
    fn invalid_count_is_rejected() {
        assert!(config_from_args(args(&["many"])).is_err());
        assert!(config_from_args(args(&["1", "a.db", "extra"])).is_err());
    }
}
