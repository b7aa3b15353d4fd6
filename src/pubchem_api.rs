//! # PubChem Lookup Module
//!
//! Queries the public PubChem PUG REST API for the IUPAC name of a compound
//! given its SMILES string and returns the name together with the compound
//! info page URL. The "first result entry" assumption of the PUG payload is a
//! validated precondition here, not an implicit index access: an empty
//! `Properties` array yields [`ApiError::EmptyLookupResult`].

use crate::api_client::{ApiError, HttpTransport};
use log::error;
use serde::{Deserialize, Serialize};
use url::Url;

pub const PUBCHEM_REST_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/smiles";
pub const PUBCHEM_COMPOUND_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/compound";

#[derive(Debug, Deserialize)]
struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties")]
    properties: Vec<CompoundProperty>,
}

#[derive(Debug, Deserialize)]
struct CompoundProperty {
    #[serde(rename = "CID")]
    cid: u64,
    #[serde(rename = "IUPACName")]
    iupac_name: Option<String>,
}

/// Name entry extracted from the first PubChem result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubChemName {
    pub iupac_name: String,
    pub cid: u64,
    /// Human-readable compound info page for the resolved CID.
    pub info_url: String,
}

/// Builds the PUG property query URL; the SMILES travels percent-encoded as a
/// path segment.
pub fn property_url(smiles: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(PUBCHEM_REST_URL)?;
    url.path_segments_mut()
        .map_err(|()| url::ParseError::SetHostOnCannotBeABaseUrl)?
        .push(smiles)
        .push("property")
        .push("IUPACName")
        .push("JSON");
    Ok(url)
}

/// Looks up the IUPAC name of `smiles` on PubChem. Failures are logged and
/// rethrown unchanged; the caller decides what to do with them.
pub fn search_pubchem<C: HttpTransport>(client: &C, smiles: &str) -> Result<PubChemName, ApiError> {
    let url = property_url(smiles)?;
    let body = client.get_text(url.as_str()).map_err(|e| {
        error!("Error in search_pubchem: {}", e);
        e
    })?;
    parse_property_response(&body)
}

/// Extracts the first property entry from a PUG `PropertyTable` JSON payload.
pub fn parse_property_response(body: &str) -> Result<PubChemName, ApiError> {
    let parsed: PropertyResponse = serde_json::from_str(body).map_err(|e| {
        error!("Error parsing PubChem response: {}", e);
        ApiError::from(e)
    })?;
    let first = parsed
        .property_table
        .properties
        .first()
        .ok_or(ApiError::EmptyLookupResult)?;
    let iupac_name = first
        .iupac_name
        .clone()
        .ok_or(ApiError::MissingField("IUPACName"))?;
    Ok(PubChemName {
        iupac_name,
        cid: first.cid,
        info_url: format!("{}/{}", PUBCHEM_COMPOUND_URL, first.cid),
    })
}
