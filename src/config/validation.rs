use crate::config::types::{Config, SourceSettings};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source("books", &config.books)?;
    validate_source("movies", &config.movies)?;

    if config.http.timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "timeout-seconds must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates one source section
fn validate_source(name: &str, settings: &SourceSettings) -> Result<(), ConfigError> {
    if settings.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "[{}] start-page must be >= 1, got {}",
            name, settings.start_page
        )));
    }

    if settings.end_page < settings.start_page {
        return Err(ConfigError::Validation(format!(
            "[{}] end-page {} is before start-page {}",
            name, settings.end_page, settings.start_page
        )));
    }

    if settings.pacing_max_ms < settings.pacing_min_ms {
        return Err(ConfigError::Validation(format!(
            "[{}] pacing-max-ms {} is below pacing-min-ms {}",
            name, settings.pacing_max_ms, settings.pacing_min_ms
        )));
    }

    if settings.output_path.is_empty() {
        return Err(ConfigError::Validation(format!(
            "[{}] output-path cannot be empty",
            name
        )));
    }

    let url = Url::parse(&settings.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("[{}] base-url: {}", name, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "[{}] base-url must be http or https, got '{}'",
            name,
            url.scheme()
        )));
    }

    Ok(())
}
