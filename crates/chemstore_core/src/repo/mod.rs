//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the compound store contract used by ingestion.
//! - Keep SQL details out of the ingestion service.

pub mod compound_store;
