//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate fetcher and repository calls into the ingestion use-case.
//! - Keep presentation concerns behind the `IngestObserver` seam.

pub mod ingest_service;
