//! FHIR wire types
//!
//! Only the fragments of FHIR responses the exporter actually reads are
//! modelled here. Resources themselves stay as raw JSON values so they can be
//! written back out verbatim.

mod types;

pub use types::{
    Bundle, BundleEntry, BundleLink, CapabilityStatement, CountSummary, ResourceComponent,
    RestComponent,
};
