use serde::Deserialize;
use serde_json::Value;

/// The server's self-description served at `/metadata`
#[derive(Debug, Clone, Deserialize)]
pub struct CapabilityStatement {
    pub rest: Vec<RestComponent>,
}

/// One `rest` entry of a capability statement
#[derive(Debug, Clone, Deserialize)]
pub struct RestComponent {
    pub resource: Vec<ResourceComponent>,
}

/// A supported resource type descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceComponent {
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Response to a `_summary=count` search
#[derive(Debug, Clone, Deserialize)]
pub struct CountSummary {
    pub total: u64,
}

/// One page of a search result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    pub link: Vec<BundleLink>,

    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

/// A pagination link relation
#[derive(Debug, Clone, Deserialize)]
pub struct BundleLink {
    pub relation: String,
    pub url: String,
}

/// A Bundle entry wrapping one resource
#[derive(Debug, Clone, Deserialize)]
pub struct BundleEntry {
    pub resource: Value,
}

impl Bundle {
    /// Returns the URL of the `next` link, if the page has one
    pub fn next_link(&self) -> Option<&str> {
        self.link
            .iter()
            .find(|link| link.relation == "next")
            .map(|link| link.url.as_str())
    }

    /// Iterates over the embedded resources in entry order
    pub fn resources(&self) -> impl Iterator<Item = &Value> {
        self.entry.iter().map(|entry| &entry.resource)
    }
}
