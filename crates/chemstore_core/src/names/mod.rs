//! Trivial-name normalization.
//!
//! # Responsibility
//! - Turn raw synonym payloads into the clean name list stored per compound.
//!
//! # Invariants
//! - Filtering is pure and never fails.

pub mod filter;

pub use filter::filter_names;
