//! Configuration module for fhir-walk
//!
//! A run is configured entirely from the command line: the server's base URL
//! and the directory the `.ndjson` files are appended to.
//!
//! # Example
//!
//! ```no_run
//! use fhir_walk::config::ExportConfig;
//!
//! let config = ExportConfig::new("http://localhost:8080/fhir/", "./export").unwrap();
//! assert_eq!(config.base_url, "http://localhost:8080/fhir");
//! ```

mod types;
mod validation;

// Re-export types
pub use types::ExportConfig;
