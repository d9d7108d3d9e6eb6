use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::PathBuf;

/// Configuration for one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Canonical FHIR base URL, without a trailing slash
    pub base_url: String,

    /// Directory the per-type `.ndjson` files are appended to
    pub output_dir: PathBuf,
}

impl ExportConfig {
    /// Builds and validates a configuration
    ///
    /// Trailing slashes are trimmed from the base URL so that endpoint URLs
    /// are built as `{base_url}/{path}`.
    ///
    /// # Returns
    ///
    /// * `Ok(ExportConfig)` - The validated configuration
    /// * `Err(ConfigError)` - The base URL or output directory is unusable
    pub fn new(base_url: &str, output_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let config = Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            output_dir: output_dir.into(),
        };

        validate(&config)?;

        Ok(config)
    }

    /// Builds the URL of an endpoint relative to the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}
