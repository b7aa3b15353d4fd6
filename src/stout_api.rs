//! # STOUT/DECIMER Operations Module
//!
//! ## Aim
//! One stateless operation per conversion workflow against the remote
//! chemistry backend: SMILES -> IUPAC name, editor-exported structure ->
//! IUPAC name, IUPAC name -> SMILES, structure image -> SMILES and the
//! backend health probe. Each operation is a pure request/response mapping
//! over the gateway in `api_client.rs`: no retry, no cache, no state.
//!
//! ## Failure policy
//! Operations never recover. Every failure is logged and rethrown unchanged;
//! the session store is the recovery boundary.

use crate::api_client::{ApiClient, ApiError, HttpTransport};
use log::{error, info};
use reqwest::blocking::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

pub const SMILE2IUPAC_PATH: &str = "/latest/stout/SMILE2IUPAC";
pub const IUPAC2SMILES_PATH: &str = "/latest/stout/IUPAC2SMILES";
pub const IMAGE2SMILES_PATH: &str = "/latest/decimer/image2SMILES";
pub const HEALTH_PATH: &str = "/latest/stout/health";

/// Response format requested from SMILE2IUPAC. Sent lowercased on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

impl OutputFormat {
    pub fn as_query(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

/// Name-to-structure engine selected on IUPAC2SMILES.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Converter {
    #[default]
    Stout,
    Opsin,
}

impl Converter {
    pub fn as_query(&self) -> &'static str {
        match self {
            Converter::Stout => "stout",
            Converter::Opsin => "opsin",
        }
    }
}

/// Depiction requested alongside the generated structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visualize {
    #[default]
    TwoD,
    ThreeD,
}

impl Visualize {
    pub fn as_query(&self) -> &'static str {
        match self {
            Visualize::TwoD => "2D",
            Visualize::ThreeD => "3D",
        }
    }
}

impl<C: HttpTransport> ApiClient<C> {
    /// Translates a SMILES string into IUPAC names. The structure text travels
    /// as the plain-text body; `retranslate` (OPSIN cross-check) and the
    /// lowercased `format` go as query parameters. The returned body is
    /// format-dependent: an HTML table fragment or a JSON payload.
    pub fn smiles_to_iupac(
        &self,
        smiles: &str,
        retranslate: bool,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let retranslate = if retranslate { "true" } else { "false" };
        let params = [("retranslate", retranslate), ("format", format.as_query())];
        self.post_plain(SMILE2IUPAC_PATH, &params, smiles.to_string())
            .map_err(|e| {
                error!("Error in smiles_to_iupac: {}", e);
                e
            })
    }

    /// Sibling of [`smiles_to_iupac`](Self::smiles_to_iupac) for text exported
    /// by the structure editor. Same endpoint, same behavior; kept as its own
    /// entry point because the two UI paths supply differently-shaped input.
    pub fn structure_to_iupac(
        &self,
        structure: &str,
        retranslate: bool,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        self.smiles_to_iupac(structure, retranslate, format)
    }

    /// Converts an IUPAC name into a SMILES string with the selected converter
    /// and a 2D/3D depiction of the result.
    pub fn iupac_to_smiles(
        &self,
        iupac_name: &str,
        converter: Converter,
        visualize: Visualize,
    ) -> Result<String, ApiError> {
        let params = [
            ("input_text", iupac_name),
            ("converter", converter.as_query()),
            ("visualize", visualize.as_query()),
        ];
        self.get(IUPAC2SMILES_PATH, &params).map_err(|e| {
            error!("Error in iupac_to_smiles: {}", e);
            e
        })
    }

    /// Sends image bytes to the DECIMER recognizer and returns the recognized
    /// structure string.
    pub fn image_to_smiles(&self, image: Vec<u8>, filename: &str) -> Result<String, ApiError> {
        let part = Part::bytes(image)
            .file_name(filename.to_string())
            .mime_str(image_mime(filename))?;
        let form = Form::new().part("file", part);
        self.post_form(IMAGE2SMILES_PATH, form).map_err(|e| {
            error!("Error in image_to_smiles: {}", e);
            e
        })
    }

    /// Probes backend liveness; returns the raw liveness payload.
    pub fn check_health(&self) -> Result<String, ApiError> {
        let url = self.endpoint(HEALTH_PATH, &[])?;
        info!("Checking health at: {}", url);
        self.get(HEALTH_PATH, &[]).map_err(|e| {
            error!("Error in check_health: {}", e);
            e
        })
    }
}

/// Mime type for the uploaded structure image, guessed from the file name.
pub fn image_mime(filename: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "image/png",
    }
}
