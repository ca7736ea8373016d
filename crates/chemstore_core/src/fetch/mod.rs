//! Remote compound lookup.
//!
//! # Responsibility
//! - Define the fetcher contract consumed by the ingestion runner.
//! - Provide the PubChem PUG REST implementation.
//!
//! # Invariants
//! - A fetcher never returns a compound without a canonical structure or a
//!   preferred name.
//! - Returned compounds carry filtered trivial names.

use crate::model::compound::{Compound, CompoundId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod pubchem;

pub use pubchem::{PubChemConfig, PubChemFetcher};

pub type FetchResult<T> = Result<T, FetchError>;

/// Why a compound could not be obtained for one identifier.
#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Status { id: CompoundId, status: u16 },
    Decode(serde_json::Error),
    NotFound(CompoundId),
    MissingField {
        id: CompoundId,
        field: &'static str,
    },
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Status { id, status } => {
                write!(f, "lookup of compound {id} answered with HTTP {status}")
            }
            Self::Decode(err) => write!(f, "invalid response body: {err}"),
            Self::NotFound(id) => write!(f, "compound not found: {id}"),
            Self::MissingField { id, field } => {
                write!(f, "compound {id} has no {field}")
            }
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Looks up one compound by identifier.
pub trait CompoundFetcher {
    fn fetch(&self, id: CompoundId) -> FetchResult<Compound>;
}
