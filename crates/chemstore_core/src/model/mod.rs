//! Domain model shared by fetchers, storage and the ingestion runner.
//!
//! # Invariants
//! - Every compound is identified by its numeric `CompoundId`.
//! - Records are never mutated after construction.

pub mod compound;
