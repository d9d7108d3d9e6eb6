//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests the exporter makes, including:
//! - Building the HTTP client with the fhir-walk user agent
//! - GET requests with optional query parameters
//! - Status checking and JSON decoding
//! - Error classification into transport, status and JSON failures

use crate::{Result, WalkError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Media type requested from the server
const FHIR_JSON: &str = "application/fhir+json";

/// Builds an HTTP client with proper configuration
///
/// No request timeout is configured: a hung request blocks the run until the
/// connection is closed.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    // Format: fhir-walk/Version
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(FHIR_JSON));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .gzip(true)
        .brotli(true)
        .build()
}

/// A FHIR server reached through a canonical base URL
#[derive(Debug, Clone)]
pub struct FhirClient {
    http: Client,
    base_url: String,
}

impl FhirClient {
    /// Creates a client for the given base URL
    ///
    /// The base URL is expected to be validated already (see
    /// [`ExportConfig`](crate::config::ExportConfig)); a trailing slash is
    /// trimmed regardless.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = build_http_client().map_err(|source| WalkError::Http {
            url: base_url.clone(),
            source,
        })?;

        Ok(Self { http, base_url })
    }

    /// Returns the canonical base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base_url}/{path}`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetches a URL and decodes its body as JSON
    ///
    /// # Request Flow
    ///
    /// 1. Send GET, appending `query` when it is non-empty
    /// 2. Any transport failure → `WalkError::Http`
    /// 3. Any non-2xx status → `WalkError::Status`
    /// 4. Body that does not decode into `T` → `WalkError::Json`
    ///
    /// Nothing is retried.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|source| WalkError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| WalkError::Http {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| WalkError::Json {
            url: url.to_string(),
            source,
        })
    }
}
