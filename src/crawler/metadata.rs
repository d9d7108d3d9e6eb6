//! Capability statement and count probing
//!
//! Before anything is exported the server is asked which resource types it
//! supports and how many instances of each it holds.

use crate::crawler::FhirClient;
use crate::fhir::{CapabilityStatement, CountSummary};
use crate::{Result, WalkError};
use std::collections::{BTreeMap, BTreeSet};

/// Fetches `{base_url}/metadata` and returns the supported resource types
///
/// Only the first `rest` component is consulted. A capability statement
/// without one is reported as `WalkError::Shape`; missing `resource` or
/// `type` fields surface as `WalkError::Json`.
pub async fn resolve_resource_types(client: &FhirClient) -> Result<BTreeSet<String>> {
    let url = client.endpoint("metadata");
    let statement: CapabilityStatement = client.get_json(&url, &[]).await?;

    let rest = statement
        .rest
        .into_iter()
        .next()
        .ok_or_else(|| WalkError::Shape {
            url,
            message: "capability statement has an empty 'rest' array".to_string(),
        })?;

    Ok(rest
        .resource
        .into_iter()
        .map(|resource| resource.resource_type)
        .collect())
}

/// Probes `{base_url}/{type}?_summary=count` for every resource type
///
/// Requests are issued one at a time in set order. The counts are a snapshot:
/// nothing re-checks them against what the export later finds.
pub async fn probe_counts(
    client: &FhirClient,
    resource_types: &BTreeSet<String>,
) -> Result<BTreeMap<String, u64>> {
    let mut counts = BTreeMap::new();

    for resource_type in resource_types {
        let url = client.endpoint(resource_type);
        let summary: CountSummary = client.get_json(&url, &[("_summary", "count")]).await?;
        tracing::debug!("{}: {} resources", resource_type, summary.total);
        counts.insert(resource_type.clone(), summary.total);
    }

    Ok(counts)
}
