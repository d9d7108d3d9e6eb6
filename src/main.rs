//! fhir-walk main entry point
//!
//! This is the command-line interface for the fhir-walk exporter.

use anyhow::Context;
use clap::Parser;
use fhir_walk::config::ExportConfig;
use fhir_walk::crawler::run_export;
use fhir_walk::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// fhir-walk: export every resource from a FHIR server
///
/// Discovers the resource types the server supports, counts them, and
/// appends every instance of each non-empty type to
/// `OUTPUT_DIR/<ResourceType>.ndjson`. Existing files are appended to,
/// never truncated.
#[derive(Parser, Debug)]
#[command(name = "fhir-walk")]
#[command(version)]
#[command(about = "Export every resource from a FHIR server to ndjson", long_about = None)]
struct Cli {
    /// FHIR base URL, e.g. http://localhost:8080/fhir
    #[arg(value_name = "FHIR_BASE_URL")]
    base_url: String,

    /// Directory to append the .ndjson files to
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = ExportConfig::new(&cli.base_url, cli.output_dir)
        .context("Invalid command-line arguments")?;

    let summary = run_export(config)
        .await
        .with_context(|| format!("Export from {} failed", cli.base_url))?;

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fhir_walk=info,warn"),
            1 => EnvFilter::new("fhir_walk=debug,info"),
            2 => EnvFilter::new("fhir_walk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
