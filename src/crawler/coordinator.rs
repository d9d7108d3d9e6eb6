//! Export coordinator - main run orchestration logic
//!
//! This module wires the other components into one run:
//! - Resolving the supported resource types
//! - Probing a count for each of them
//! - Skipping empty types
//! - Paging through every other type and appending it to disk

use crate::config::ExportConfig;
use crate::crawler::{probe_counts, resolve_resource_types, FhirClient, Pager};
use crate::output::{ExportSummary, NdjsonWriter, TypeExport};
use crate::state::RunState;
use crate::Result;

/// Main export coordinator structure
pub struct Exporter {
    config: ExportConfig,
    client: FhirClient,
    state: RunState,
}

impl Exporter {
    /// Creates a new exporter for a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Exporter)` - Ready to run, in `RunState::ResolvingMetadata`
    /// * `Err(WalkError)` - The HTTP client could not be built
    pub fn new(config: ExportConfig) -> Result<Self> {
        let client = FhirClient::new(&config.base_url)?;

        Ok(Self {
            config,
            client,
            state: RunState::ResolvingMetadata,
        })
    }

    /// Returns the current run state
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Runs the export to completion
    ///
    /// The first error from any component aborts the run and leaves the
    /// exporter in `RunState::Failed`. Pages already written stay on disk.
    pub async fn run(&mut self) -> Result<ExportSummary> {
        match self.run_phases().await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::error!("Export failed while {}: {}", self.state, e);
                self.transition(RunState::Failed);
                Err(e)
            }
        }
    }

    async fn run_phases(&mut self) -> Result<ExportSummary> {
        let mut summary = ExportSummary::new(&self.config);

        tracing::info!("Getting supported resource types...");
        let resource_types = resolve_resource_types(&self.client).await?;
        tracing::debug!("Supported resource types: {:?}", resource_types);

        self.transition(RunState::ProbingCounts);
        tracing::info!(
            "Getting resource counts for {} types...",
            resource_types.len()
        );
        let resource_counts = probe_counts(&self.client, &resource_types).await?;
        tracing::info!("Resource counts: {:?}", resource_counts);
        summary.resource_counts = resource_counts.clone();

        tracing::info!(
            "Writing {} resources from {} to {}...",
            summary.total_reported(),
            self.config.base_url,
            self.config.output_dir.display()
        );

        for (resource_type, count) in &resource_counts {
            if *count == 0 {
                tracing::info!("Skipping {}: server reports no resources", resource_type);
                summary.skipped.push(resource_type.clone());
                continue;
            }

            self.transition(RunState::Exporting(resource_type.clone()));
            tracing::info!("Writing {} resources...", resource_type);

            let export = self.export_resource_type(resource_type).await?;
            tracing::info!(
                "Wrote {} {} resources from {} pages",
                export.resources,
                resource_type,
                export.pages
            );
            summary.exported.insert(resource_type.clone(), export);
        }

        self.transition(RunState::Done);
        summary.finish();
        tracing::info!("Finished downloading all resources");

        Ok(summary)
    }

    /// Pages through one resource type and appends it to its output file
    ///
    /// Starts at `{base_url}/{resource_type}` and follows `next` links until
    /// a page has none. Each page is written before the next is requested.
    pub async fn export_resource_type(&self, resource_type: &str) -> Result<TypeExport> {
        let writer = NdjsonWriter::new(&self.config.output_dir, resource_type);
        let mut pager = Pager::new(&self.client, self.client.endpoint(resource_type));

        let mut resources = 0;
        while let Some(page) = pager.next_page().await? {
            resources += writer.append_page(&page)?;
            tracing::debug!(
                "{}: page {} written to {}",
                resource_type,
                pager.pages_fetched(),
                writer.path().display()
            );
        }

        Ok(TypeExport {
            pages: pager.pages_fetched(),
            resources,
        })
    }

    fn transition(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid run state transition: {} -> {}",
            self.state,
            next
        );
        tracing::debug!("Run state: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Runs a complete export operation
///
/// # Example
///
/// ```no_run
/// use fhir_walk::config::ExportConfig;
/// use fhir_walk::crawler::run_export;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExportConfig::new("http://localhost:8080/fhir", "./export")?;
/// let summary = run_export(config).await?;
/// println!("{} resources written", summary.total_written());
/// # Ok(())
/// # }
/// ```
pub async fn run_export(config: ExportConfig) -> Result<ExportSummary> {
    let mut exporter = Exporter::new(config)?;
    exporter.run().await
}
