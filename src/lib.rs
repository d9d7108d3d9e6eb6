//! fhir-walk: a FHIR server exporter
//!
//! This crate discovers the resource types a FHIR server supports, counts
//! their instances, and pages through every non-empty type, appending each
//! resource to a newline-delimited JSON file per type.

pub mod config;
pub mod crawler;
pub mod fhir;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fhir-walk operations
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    #[error("Unexpected response shape from {url}: {message}")]
    Shape { url: String, message: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize resource: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing network location in URL: {0}")]
    MissingDomain(String),
}

/// Result type alias for fhir-walk operations
pub type Result<T> = std::result::Result<T, WalkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::ExportConfig;
pub use crawler::{run_export, Exporter};
pub use output::ExportSummary;
pub use state::RunState;
pub use url::fixup_url;
