use crate::config::types::{ApiConfig, Config, CrawlerConfig, FieldsConfig, OutputConfig};
use crate::output::OutputField;
use crate::ConfigError;
use url::Url;

/// Upper bound for either pacing delay
const MAX_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_api_config(&config.api)?;
    validate_output_config(&config.output)?;
    validate_fields_config(&config.fields)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_comments_per_video < 1 {
        return Err(ConfigError::Validation(format!(
            "max_comments_per_video must be >= 1, got {}",
            config.max_comments_per_video
        )));
    }

    for (name, value) in [
        ("delay_between_videos_ms", config.delay_between_videos_ms),
        ("delay_between_requests_ms", config.delay_between_requests_ms),
    ] {
        if value > MAX_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "{} must be <= {}ms, got {}ms",
                name, MAX_DELAY_MS, value
            )));
        }
    }

    Ok(())
}

/// Validates remote API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.filename_prefix.trim().is_empty() {
        return Err(ConfigError::Validation(
            "filename_prefix cannot be empty".to_string(),
        ));
    }

    if config.filename_prefix.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "filename_prefix must not contain path separators, got '{}'",
            config.filename_prefix
        )));
    }

    Ok(())
}

/// Validates the disabled field list
fn validate_fields_config(config: &FieldsConfig) -> Result<(), ConfigError> {
    for name in &config.disabled {
        let field = OutputField::from_name(name).ok_or_else(|| {
            ConfigError::Validation(format!("Unknown output field '{}'", name))
        })?;

        if !field.is_optional() {
            return Err(ConfigError::Validation(format!(
                "Output field '{}' cannot be disabled",
                name
            )));
        }
    }

    Ok(())
}
