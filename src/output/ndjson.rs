use crate::fhir::Bundle;
use crate::{Result, WalkError};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Returns `{output_dir}/{resource_type}.ndjson`
pub fn output_path(output_dir: &Path, resource_type: &str) -> PathBuf {
    output_dir.join(format!("{}.ndjson", resource_type))
}

/// Appends the resources of one resource type to its `.ndjson` file
///
/// The file is opened in append mode for every page and closed again before
/// `append_page` returns, so every page that was written survives a later
/// failure. Existing content is never truncated: writing the same pages twice
/// yields duplicate lines.
#[derive(Debug, Clone)]
pub struct NdjsonWriter {
    path: PathBuf,
}

impl NdjsonWriter {
    /// Creates a writer for `resource_type` under `output_dir`
    ///
    /// Nothing touches the filesystem until the first page is appended.
    pub fn new(output_dir: &Path, resource_type: &str) -> Self {
        Self {
            path: output_path(output_dir, resource_type),
        }
    }

    /// Returns the path of the output file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends every resource in `page`, one compact JSON object per line
    ///
    /// A page without entries still creates the file.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of lines written
    /// * `Err(WalkError)` - The file could not be opened or written
    pub fn append_page(&self, page: &Bundle) -> Result<usize> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.write_error(source))?;
        let mut out = BufWriter::new(file);

        let mut written = 0;
        for resource in page.resources() {
            serde_json::to_writer(&mut out, resource)?;
            out.write_all(b"\n")
                .map_err(|source| self.write_error(source))?;
            written += 1;
        }

        out.flush().map_err(|source| self.write_error(source))?;

        Ok(written)
    }

    fn write_error(&self, source: std::io::Error) -> WalkError {
        WalkError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
