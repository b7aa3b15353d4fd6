//! # API Client Module
//!
//! ## Aim
//! This module is the HTTP gateway of the crate: it resolves the backend base
//! address from the deployment environment and issues all outbound HTTP calls
//! with consistent headers. Every network byte that leaves this crate goes
//! through the `HttpTransport` trait defined here.
//!
//! ## Main Data Structures and Logic
//! - `HttpTransport`: trait with dependency injection for the HTTP client (enables testing)
//! - `ApiClient<C>`: holds the resolved base URL and the injected transport
//! - `ApiError`: error taxonomy for transport, remote status and response-shape failures
//! - `DeployMode` + `resolve_api_url()`: deterministic base-address resolution
//!
//! ## Key Methods
//! - `resolve_api_url()`: pure function of the deployment environment, no network I/O
//! - `ApiClient::endpoint()`: joins a path onto the base URL and appends query pairs
//! - `ApiClient::get()` / `post_plain()` / `post_form()`: one call shape per verb
//!
//! Errors are surfaced to the caller unchanged after logging; no retry, no
//! swallowing, no timeout is imposed at this layer.

use log::info;
use reqwest::StatusCode;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, Response};
use reqwest::header;
use thiserror::Error;
use url::Url;

/// Port the backend listens on when the address is derived from a host name.
pub const DEFAULT_BACKEND_PORT: u16 = 3000;
/// Fallback backend address for development deployments.
pub const DEFAULT_DEV_URL: &str = "http://localhost:3000";
/// Fallback host for production deployments with no host configured.
pub const DEFAULT_PROD_HOST: &str = "backend";

/// HTTP transport trait for dependency injection
pub trait HttpTransport {
    fn get_text(&self, url: &str) -> Result<String, ApiError>;
    fn post_text(&self, url: &str, body: String, content_type: &'static str)
    -> Result<String, ApiError>;
    fn post_multipart(&self, url: &str, form: Form) -> Result<String, ApiError>;
}

// Implementation for the real reqwest client
impl HttpTransport for Client {
    fn get_text(&self, url: &str) -> Result<String, ApiError> {
        let response = self
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()?;
        read_success_body(url, response)
    }

    fn post_text(
        &self,
        url: &str,
        body: String,
        content_type: &'static str,
    ) -> Result<String, ApiError> {
        let response = self
            .post(url)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::ACCEPT, "application/json")
            .body(body)
            .send()?;
        read_success_body(url, response)
    }

    fn post_multipart(&self, url: &str, form: Form) -> Result<String, ApiError> {
        let response = self.post(url).multipart(form).send()?;
        read_success_body(url, response)
    }
}

fn read_success_body(url: &str, response: Response) -> Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::RemoteStatus {
            status,
            url: url.to_string(),
        });
    }
    Ok(response.text()?)
}

/// error types for the conversion client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Remote service returned {status} for {url}")]
    RemoteStatus { status: StatusCode, url: String },
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Lookup returned no result entries")]
    EmptyLookupResult,
    #[error("Missing field in response: {0}")]
    MissingField(&'static str),
    #[error("No IUPAC name found in response table")]
    NameNotFound,
}

/// Deployment environment the base address is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    Production,
    Development,
}

/// Resolves the backend base address. Pure function of its inputs: in
/// production the address is derived from the deployment host on the fixed
/// backend port, in development the externally supplied override wins and
/// the local default is the fallback. No network I/O.
pub fn resolve_api_url(mode: DeployMode, host: Option<&str>, override_url: Option<&str>) -> String {
    match mode {
        DeployMode::Production => {
            let host = host.unwrap_or(DEFAULT_PROD_HOST);
            format!("http://{}:{}", host, DEFAULT_BACKEND_PORT)
        }
        DeployMode::Development => override_url
            .map(|u| u.to_string())
            .unwrap_or_else(|| DEFAULT_DEV_URL.to_string()),
    }
}

/// Reads the deployment environment from process variables:
/// `APP_ENV=production` selects production mode, `CHEM_API_HOST` supplies the
/// production host and `CHEM_API_URL` the development override.
pub fn resolve_api_url_from_env() -> String {
    let mode = if std::env::var("APP_ENV").as_deref() == Ok("production") {
        DeployMode::Production
    } else {
        DeployMode::Development
    };
    let host = std::env::var("CHEM_API_HOST").ok();
    let override_url = std::env::var("CHEM_API_URL").ok();
    resolve_api_url(mode, host.as_deref(), override_url.as_deref())
}

/// Gateway for the conversion backend: resolved base URL plus the injected
/// transport. All conversion operations are defined on this struct in
/// `stout_api.rs`; this module only knows how to address and send.
pub struct ApiClient<C: HttpTransport> {
    base_url: Url,
    client: C,
}

impl ApiClient<Client> {
    /// Client against the environment-resolved backend address.
    pub fn new() -> Result<Self, ApiError> {
        Self::from_url(&resolve_api_url_from_env())
    }

    pub fn from_url(api_url: &str) -> Result<Self, ApiError> {
        info!("API URL: {}", api_url);
        Ok(Self {
            base_url: Url::parse(api_url)?,
            client: Client::new(),
        })
    }
}

impl<C: HttpTransport> ApiClient<C> {
    pub fn with_client(api_url: &str, client: C) -> Result<Self, ApiError> {
        info!("API URL: {}", api_url);
        Ok(Self {
            base_url: Url::parse(api_url)?,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Direct access to the transport, for calls that target a foreign base
    /// address (the PubChem lookup).
    pub fn transport(&self) -> &C {
        &self.client
    }

    /// Joins `path` onto the base URL and appends the given query pairs.
    pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    pub fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let url = self.endpoint(path, params)?;
        self.client.get_text(url.as_str())
    }

    /// POST with a plain-text body; the text/plain content type overrides the
    /// default JSON headers for the body only.
    pub fn post_plain(
        &self,
        path: &str,
        params: &[(&str, &str)],
        body: String,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(path, params)?;
        self.client.post_text(url.as_str(), body, "text/plain")
    }

    pub fn post_form(&self, path: &str, form: Form) -> Result<String, ApiError> {
        let url = self.endpoint(path, &[])?;
        self.client.post_multipart(url.as_str(), form)
    }
}
