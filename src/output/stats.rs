//! Export run statistics
//!
//! This module records what an export run probed, fetched and wrote, and
//! renders that for the operator once the run finishes.

use crate::config::ExportConfig;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Pages and resources written for one resource type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeExport {
    /// Number of Bundle pages fetched
    pub pages: usize,

    /// Number of resources appended to the output file
    pub resources: usize,
}

/// Summary of one export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Base URL the run exported from
    pub base_url: String,

    /// Directory the `.ndjson` files were written to
    pub output_dir: PathBuf,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished, if it did
    pub finished_at: Option<DateTime<Utc>>,

    /// Count reported by the server for every supported type
    pub resource_counts: BTreeMap<String, u64>,

    /// Types that were paged through
    pub exported: BTreeMap<String, TypeExport>,

    /// Types skipped because their count was zero
    pub skipped: Vec<String>,
}

impl ExportSummary {
    /// Starts a summary for a run of `config`
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            output_dir: config.output_dir.clone(),
            started_at: Utc::now(),
            finished_at: None,
            resource_counts: BTreeMap::new(),
            exported: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Marks the run as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Sum of the counts the server reported
    pub fn total_reported(&self) -> u64 {
        self.resource_counts.values().sum()
    }

    /// Sum of the resources actually written
    pub fn total_written(&self) -> usize {
        self.exported.values().map(|export| export.resources).sum()
    }

    /// Sum of the pages fetched across all types
    pub fn total_pages(&self) -> usize {
        self.exported.values().map(|export| export.pages).sum()
    }

    /// Wall-clock duration of a finished run
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at
            .map(|finished| finished - self.started_at)
    }
}

/// Prints the summary to stdout in a formatted manner
///
/// Types whose written count differs from the probed count are flagged; the
/// server's data may change between the probe and the export.
pub fn print_summary(summary: &ExportSummary) {
    println!("=== Export Summary ===\n");

    println!("Source: {}", summary.base_url);
    println!("Output: {}", summary.output_dir.display());
    println!("Started: {}", summary.started_at.to_rfc3339());
    if let Some(duration) = summary.duration() {
        println!("Duration: {:.1}s", duration.num_milliseconds() as f64 / 1000.0);
    }
    println!();

    println!("Exported Types ({}):", summary.exported.len());
    for (resource_type, export) in &summary.exported {
        let reported = summary
            .resource_counts
            .get(resource_type)
            .copied()
            .unwrap_or(0);
        let marker = if export.resources as u64 == reported {
            ""
        } else {
            " (count changed since probe)"
        };
        println!(
            "  {}: {} resources in {} pages, {} reported{}",
            resource_type, export.resources, export.pages, reported, marker
        );
    }
    println!();

    if !summary.skipped.is_empty() {
        println!("Skipped Types ({}):", summary.skipped.len());
        println!("  {}", summary.skipped.join(", "));
        println!();
    }

    println!(
        "Total: {} resources written in {} pages ({} reported)",
        summary.total_written(),
        summary.total_pages(),
        summary.total_reported()
    );
}
