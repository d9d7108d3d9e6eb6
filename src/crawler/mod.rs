//! Crawler module for walking a FHIR server
//!
//! This module contains the core export logic, including:
//! - HTTP fetching and JSON decoding
//! - Capability statement resolution and count probing
//! - Bundle pagination
//! - Overall export coordination

mod coordinator;
mod fetcher;
mod metadata;
mod pager;

pub use coordinator::{run_export, Exporter};
pub use fetcher::{build_http_client, FhirClient};
pub use metadata::{probe_counts, resolve_resource_types};
pub use pager::Pager;
