//! URL handling module for fhir-walk
//!
//! FHIR servers frequently advertise themselves under an address that differs
//! from the one the operator reaches them at (a reverse proxy, a container
//! hostname, a plain-HTTP port in front of TLS termination). Every URL the
//! server hands back is rewritten onto the operator's base URL before it is
//! requested.

mod domain;
mod fixup;

// Re-export main functions
pub use domain::{extract_netloc, extract_scheme};
pub use fixup::fixup_url;
