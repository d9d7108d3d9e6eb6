//! Output module for writing exported resources and run summaries
//!
//! This module handles:
//! - Appending Bundle resources to per-type `.ndjson` files
//! - Recording what an export run fetched and wrote

mod ndjson;
pub mod stats;

pub use ndjson::{output_path, NdjsonWriter};
pub use stats::{print_summary, ExportSummary, TypeExport};
