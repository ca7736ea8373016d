//! Sequential compound ingestion.
//!
//! # Responsibility
//! - Walk a contiguous identifier range after the highest stored id.
//! - Fetch, persist and classify each identifier.
//! - Aggregate the run report.
//!
//! # Invariants
//! - Identifiers are processed one at a time in ascending order, with no
//!   identifier in the range skipped.
//! - A fetch or storage failure only affects its own identifier; the run
//!   always continues to the end of the range.

use crate::fetch::CompoundFetcher;
use crate::model::compound::CompoundId;
use crate::repo::compound_store::{CompoundStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type IngestResult<T> = Result<T, IngestError>;

/// Failures that prevent a run from starting.
#[derive(Debug)]
pub enum IngestError {
    /// `count` must be positive.
    InvalidCount,
    /// `start + count` does not fit in a compound id.
    RangeOverflow { start: CompoundId, count: u32 },
    /// Store initialization or the max-id lookup failed.
    Store(StoreError),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCount => write!(f, "identifier count must be greater than zero"),
            Self::RangeOverflow { start, count } => {
                write!(f, "identifier range {start}+{count} overflows")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for IngestError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of processing one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CidOutcome {
    /// Compound fetched and stored.
    Added,
    /// Compound fetched but its id was already stored.
    AlreadyPresent,
    /// Remote lookup failed or returned an incomplete record.
    FetchFailed(String),
    /// Persistence raised an error.
    StorageFailed(String),
}

impl CidOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// End-of-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// First identifier of the range.
    pub start_id: CompoundId,
    /// Number of identifiers attempted.
    pub attempted: u32,
    /// Identifiers stored by this run, ascending.
    pub added: Vec<CompoundId>,
    /// Identifiers not stored by this run, ascending.
    pub not_added: Vec<CompoundId>,
}

impl RunReport {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn not_added_count(&self) -> usize {
        self.not_added.len()
    }
}

/// Receives progress events while a run executes.
///
/// All methods default to no-ops so presenters implement only what they show.
pub trait IngestObserver {
    fn run_started(&mut self, _start_id: CompoundId, _count: u32) {}
    fn cid_finished(&mut self, _id: CompoundId, _outcome: &CidOutcome) {}
    fn run_finished(&mut self, _report: &RunReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl IngestObserver for NoopObserver {}

/// Use-case service driving fetcher and store over an identifier range.
pub struct IngestService<S: CompoundStore, F: CompoundFetcher> {
    store: S,
    fetcher: F,
}

impl<S: CompoundStore, F: CompoundFetcher> IngestService<S, F> {
    pub fn new(store: S, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// Ingests `count` identifiers following the highest stored id.
    pub fn run(&self, count: u32) -> IngestResult<RunReport> {
        self.run_with_observer(count, &mut NoopObserver)
    }

    /// Same as [`IngestService::run`], reporting progress to `observer`.
    ///
    /// # Errors
    /// - `InvalidCount` for `count == 0`.
    /// - `Store` when the store cannot be initialized or queried for its
    ///   highest id. Per-identifier failures never surface here.
    pub fn run_with_observer(
        &self,
        count: u32,
        observer: &mut dyn IngestObserver,
    ) -> IngestResult<RunReport> {
        if count == 0 {
            return Err(IngestError::InvalidCount);
        }

        self.store.initialize()?;
        let max_id = self.store.max_known_id()?.unwrap_or(0);
        let (start_id, end_id) = max_id
            .checked_add(1)
            .and_then(|start| Some((start, start.checked_add(i64::from(count))?)))
            .ok_or(IngestError::RangeOverflow {
                start: max_id.saturating_add(1),
                count,
            })?;

        let started_at = Instant::now();
        info!(
            "event=ingest_run module=service status=start start_cid={} count={}",
            start_id, count
        );
        observer.run_started(start_id, count);

        let mut report = RunReport {
            start_id,
            ..RunReport::default()
        };
        for cid in start_id..end_id {
            let outcome = self.ingest_one(cid);
            report.attempted += 1;
            if outcome.is_added() {
                report.added.push(cid);
            } else {
                report.not_added.push(cid);
            }
            observer.cid_finished(cid, &outcome);
        }

        info!(
            "event=ingest_run module=service status=ok start_cid={} attempted={} added={} not_added={} duration_ms={}",
            start_id,
            report.attempted,
            report.added_count(),
            report.not_added_count(),
            started_at.elapsed().as_millis()
        );
        observer.run_finished(&report);
        Ok(report)
    }

    fn ingest_one(&self, cid: CompoundId) -> CidOutcome {
        let compound = match self.fetcher.fetch(cid) {
            Ok(compound) => compound,
            Err(err) => {
                warn!(
                    "event=ingest_cid module=service status=not_found cid={} error={}",
                    cid, err
                );
                return CidOutcome::FetchFailed(err.to_string());
            }
        };

        match self.store.add_compound(&compound) {
            Ok(true) => {
                info!("event=ingest_cid module=service status=ok cid={}", cid);
                CidOutcome::Added
            }
            Ok(false) => {
                info!("event=ingest_cid module=service status=exists cid={}", cid);
                CidOutcome::AlreadyPresent
            }
            Err(err) => {
                error!(
                    "event=ingest_cid module=service status=error cid={} error_code=store_write_failed error={}",
                    cid, err
                );
                CidOutcome::StorageFailed(err.to_string())
            }
        }
    }
}
