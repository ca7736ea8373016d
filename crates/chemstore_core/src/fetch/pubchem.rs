//! PubChem PUG REST fetcher.
//!
//! Two blocking requests per identifier: one for the structure and IUPAC
//! name, one for the synonym list. A missing synonym list (HTTP 404) is an
//! empty list, not a failure.

use super::{CompoundFetcher, FetchError, FetchResult};
use crate::model::compound::{Compound, CompoundId};
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};

pub const DEFAULT_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`PubChemFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubChemConfig {
    /// PUG REST root, without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for PubChemConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PropertyResponse {
    property_table: PropertyTable,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PropertyTable {
    #[serde(default)]
    properties: Vec<CompoundProperties>,
}

#[derive(Deserialize)]
struct CompoundProperties {
    #[serde(rename = "CID")]
    cid: CompoundId,
    #[serde(
        rename = "CanonicalSMILES",
        alias = "ConnectivitySMILES",
        alias = "SMILES",
        default
    )]
    canonical_smiles: Option<String>,
    #[serde(rename = "IUPACName", default)]
    iupac_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SynonymResponse {
    information_list: InformationList,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InformationList {
    #[serde(default)]
    information: Vec<SynonymInformation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SynonymInformation {
    #[serde(rename = "CID")]
    cid: CompoundId,
    #[serde(default)]
    synonym: Vec<Value>,
}

/// Blocking PubChem client.
pub struct PubChemFetcher {
    client: Client,
    base_url: String,
}

impl PubChemFetcher {
    pub fn new(config: &PubChemConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("chemstore/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn properties_url(&self, id: CompoundId) -> String {
        format!(
            "{}/compound/cid/{id}/property/CanonicalSMILES,IUPACName/JSON",
            self.base_url
        )
    }

    fn synonyms_url(&self, id: CompoundId) -> String {
        format!("{}/compound/cid/{id}/synonyms/JSON", self.base_url)
    }

    /// GETs `url`; `Ok(None)` when the server answers 404.
    fn get_body(&self, id: CompoundId, url: &str) -> FetchResult<Option<String>> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                id,
                status: status.as_u16(),
            });
        }
        Ok(Some(response.text()?))
    }

    fn fetch_compound(&self, id: CompoundId) -> FetchResult<Compound> {
        let properties = self
            .get_body(id, &self.properties_url(id))?
            .ok_or(FetchError::NotFound(id))?;
        let synonyms = self.get_body(id, &self.synonyms_url(id))?;
        compound_from_bodies(id, &properties, synonyms.as_deref())
    }
}

impl CompoundFetcher for PubChemFetcher {
    fn fetch(&self, id: CompoundId) -> FetchResult<Compound> {
        let started_at = Instant::now();
        let result = self.fetch_compound(id);
        match &result {
            Ok(compound) => debug!(
                "event=compound_fetch module=fetch status=ok cid={} names={} duration_ms={}",
                id,
                compound.trivial_names().len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=compound_fetch module=fetch status=error cid={} duration_ms={} error={}",
                id,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// Builds a compound from PUG REST property and synonym JSON bodies.
///
/// `synonyms_body = None` means PubChem has no synonyms for the compound.
///
/// # Errors
/// - `NotFound` when the property table has no row for `id`.
/// - `MissingField` when the SMILES or the IUPAC name is absent or empty.
/// - `Decode` when a body is not the expected JSON shape.
pub fn compound_from_bodies(
    id: CompoundId,
    properties_body: &str,
    synonyms_body: Option<&str>,
) -> FetchResult<Compound> {
    let response: PropertyResponse = serde_json::from_str(properties_body)?;
    let properties = response
        .property_table
        .properties
        .into_iter()
        .find(|row| row.cid == id)
        .ok_or(FetchError::NotFound(id))?;

    let canonical_structure = non_empty(properties.canonical_smiles).ok_or(
        FetchError::MissingField {
            id,
            field: "canonical structure",
        },
    )?;
    let preferred_name = non_empty(properties.iupac_name).ok_or(FetchError::MissingField {
        id,
        field: "preferred name",
    })?;

    let synonyms = match synonyms_body {
        Some(body) => parse_synonyms(id, body)?,
        None => Vec::new(),
    };

    Ok(Compound::from_raw_names(
        id,
        canonical_structure,
        preferred_name,
        &synonyms,
    ))
}

fn parse_synonyms(id: CompoundId, body: &str) -> FetchResult<Vec<Value>> {
    let response: SynonymResponse = serde_json::from_str(body)?;
    Ok(response
        .information_list
        .information
        .into_iter()
        .find(|info| info.cid == id)
        .map(|info| info.synonym)
        .unwrap_or_default())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
