//! # Session Store Module
//!
//! ## Aim
//! Holds the live state of every conversion workflow: current input, derived
//! results and per-result loading flags. Exactly one instance per workflow
//! kind, created with defaults at construction and mutated only through the
//! action methods below.
//!
//! ## Discipline
//! - An action whose result slot is already loading, or whose input is blank,
//!   returns immediately: no state change, no network call.
//! - The loading flag covers the whole request span and is released on every
//!   path out of an action, success or failure.
//! - The store is the sole recovery boundary: operation failures become fixed
//!   human-readable strings in the result slot, never a crash.
//!
//! The store is an explicitly constructed value with an injected transport,
//! not a process-wide singleton; tests drive it with a mock transport.

use crate::api_client::{ApiClient, ApiError, HttpTransport};
use crate::pubchem_api;
use crate::response_parser;
use crate::stout_api::{Converter, OutputFormat, Visualize};
use log::error;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SMILES: &str = "CCO";

pub const IUPAC_GENERATION_ERROR: &str = "Error generating IUPAC name";
pub const PUBCHEM_SEARCH_ERROR: &str = "Error searching PubChem";
pub const SMILES_GENERATION_ERROR: &str = "Error generating SMILES";

/// SMILES -> IUPAC workflow slot. Tracks two independently loading result
/// fields: the backend-generated name and the PubChem cross-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoutState {
    pub smiles: String,
    pub iupac_name: String,
    /// Anchor fragment linking the PubChem name to its compound page.
    pub pubchem_iupac: String,
    pub iupac_loading: bool,
    pub pubchem_loading: bool,
}

impl Default for StoutState {
    fn default() -> Self {
        Self {
            smiles: DEFAULT_SMILES.to_string(),
            iupac_name: String::new(),
            pubchem_iupac: String::new(),
            iupac_loading: false,
            pubchem_loading: false,
        }
    }
}

/// Image -> structure workflow slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimerState {
    /// Preview of the uploaded image, as a data URL or file path.
    pub processed_image: Option<String>,
    pub smiles: String,
    pub retranslate: bool,
    pub output_format: OutputFormat,
    pub iupac_result: Option<String>,
}

/// Name -> structure workflow slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpsinState {
    pub iupac_name: String,
    pub smiles_result: String,
    pub converter: Converter,
    pub visualize: Visualize,
    pub loading: bool,
}

/// Partial update for the image workflow: every `Some` field replaces the
/// corresponding state field, everything else is left untouched. No
/// field-level validation is performed.
#[derive(Debug, Clone, Default)]
pub struct DecimerUpdate {
    pub processed_image: Option<String>,
    pub smiles: Option<String>,
    pub retranslate: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub iupac_result: Option<String>,
}

/// The session store: one live workflow instance per kind, plus the injected
/// gateway the actions call through. Lives for the process lifetime.
pub struct SessionStore<C: HttpTransport> {
    api: ApiClient<C>,
    pub stout: StoutState,
    pub decimer: DecimerState,
    pub opsin: OpsinState,
}

impl SessionStore<Client> {
    /// Store against the environment-resolved backend address.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::with_api(ApiClient::new()?))
    }
}

impl<C: HttpTransport> SessionStore<C> {
    pub fn with_api(api: ApiClient<C>) -> Self {
        Self {
            api,
            stout: StoutState::default(),
            decimer: DecimerState::default(),
            opsin: OpsinState::default(),
        }
    }

    pub fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    /// Generates the IUPAC name for the current SMILES through the backend
    /// and extracts the display name from the returned HTML table. No-op when
    /// the slot is already loading or the input is blank.
    pub fn generate_iupac_name(&mut self) {
        if self.stout.iupac_loading || self.stout.smiles.trim().is_empty() {
            return;
        }
        self.stout.iupac_loading = true;
        let outcome = self
            .api
            .smiles_to_iupac(&self.stout.smiles, false, OutputFormat::Html)
            .and_then(|html| response_parser::extract_iupac_from_html(&html));
        match outcome {
            Ok(name) => self.stout.iupac_name = name,
            Err(e) => {
                error!("Error generating IUPAC name: {}", e);
                self.stout.iupac_name = IUPAC_GENERATION_ERROR.to_string();
            }
        }
        self.stout.iupac_loading = false;
    }

    /// Looks the current SMILES up on PubChem and stores the result as an
    /// anchor fragment to the compound info page. Independent of the local
    /// generation slot: both may be in flight at once.
    pub fn search_pubchem_name(&mut self) {
        if self.stout.pubchem_loading || self.stout.smiles.trim().is_empty() {
            return;
        }
        self.stout.pubchem_loading = true;
        match pubchem_api::search_pubchem(self.api.transport(), &self.stout.smiles) {
            Ok(found) => {
                self.stout.pubchem_iupac =
                    response_parser::link_fragment(&found.iupac_name, &found.info_url);
            }
            Err(e) => {
                error!("Error searching PubChem: {}", e);
                self.stout.pubchem_iupac = PUBCHEM_SEARCH_ERROR.to_string();
            }
        }
        self.stout.pubchem_loading = false;
    }

    /// Converts the name in the name->structure slot into SMILES with the
    /// slot's converter and depiction settings.
    pub fn generate_smiles_from_name(&mut self) {
        if self.opsin.loading || self.opsin.iupac_name.trim().is_empty() {
            return;
        }
        self.opsin.loading = true;
        match self
            .api
            .iupac_to_smiles(&self.opsin.iupac_name, self.opsin.converter, self.opsin.visualize)
        {
            Ok(smiles) => self.opsin.smiles_result = smiles,
            Err(e) => {
                error!("Error generating SMILES: {}", e);
                self.opsin.smiles_result = SMILES_GENERATION_ERROR.to_string();
            }
        }
        self.opsin.loading = false;
    }

    /// Escape hatch for the image workflow: batches several field updates
    /// into one atomic state change.
    pub fn update_decimer_state(&mut self, update: DecimerUpdate) {
        if let Some(image) = update.processed_image {
            self.decimer.processed_image = Some(image);
        }
        if let Some(smiles) = update.smiles {
            self.decimer.smiles = smiles;
        }
        if let Some(retranslate) = update.retranslate {
            self.decimer.retranslate = retranslate;
        }
        if let Some(format) = update.output_format {
            self.decimer.output_format = format;
        }
        if let Some(result) = update.iupac_result {
            self.decimer.iupac_result = Some(result);
        }
    }
}
