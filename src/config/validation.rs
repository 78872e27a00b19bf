use crate::config::types::{Config, HeaderConfig, OutputConfig, ScraperConfig, SeedConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_header_config(&config.headers)?;
    validate_seed_config(&config.seed)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.jitter_ms > 10_000 {
        return Err(ConfigError::Validation(format!(
            "jitter_ms must be <= 10000ms, got {}ms",
            config.jitter_ms
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates request header configuration
fn validate_header_config(config: &HeaderConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Header values must be visible ASCII
    for (name, value) in [
        ("user_agent", &config.user_agent),
        ("accept_language", &config.accept_language),
    ] {
        if value.chars().any(|c| c.is_control() || !c.is_ascii()) {
            return Err(ConfigError::Validation(format!(
                "{} must contain only printable ASCII, got '{}'",
                name, value
            )));
        }
    }

    Ok(())
}

/// Validates seed listing configuration
fn validate_seed_config(config: &SeedConfig) -> Result<(), ConfigError> {
    Url::parse(&config.chart_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid chart_url: {}", e)))?;

    let origin = Url::parse(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin: {}", e)))?;

    // The origin must be able to absorb relative hrefs
    if origin.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "origin cannot be used as a base URL: {}",
            config.origin
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
