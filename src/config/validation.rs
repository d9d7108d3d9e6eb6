use crate::config::types::ExportConfig;
use crate::ConfigError;
use std::path::Path;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &ExportConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;
    validate_output_dir(&config.output_dir)?;
    Ok(())
}

/// Validates the FHIR base URL: parseable, HTTP(S), with a host
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    if base_url.is_empty() {
        return Err(ConfigError::Validation(
            "base_url cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}': scheme must be http or https, got {}",
            base_url,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}': missing host",
            base_url
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}': base URL cannot carry a query or fragment",
            base_url
        )));
    }

    Ok(())
}

/// Validates that the output directory exists
fn validate_output_dir(output_dir: &Path) -> Result<(), ConfigError> {
    if !output_dir.is_dir() {
        return Err(ConfigError::Validation(format!(
            "output directory '{}' does not exist or is not a directory",
            output_dir.display()
        )));
    }

    Ok(())
}
