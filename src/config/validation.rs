use crate::config::types::{CrawlOptions, FetchOptions};
use crate::ConfigError;
use regex::Regex;

/// Validates crawl options
///
/// Pattern compilation is checked here as well, so a crawl never starts with
/// a pattern the policy filter could not use.
pub fn validate(options: &CrawlOptions) -> Result<(), ConfigError> {
    validate_limits(options)?;
    validate_patterns("include", &options.include_patterns)?;
    validate_patterns("exclude", &options.exclude_patterns)?;
    validate_fetch_options(&options.fetch)?;
    Ok(())
}

/// Validates page, concurrency and frontier limits
fn validate_limits(options: &CrawlOptions) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for usize, so no check needed

    if options.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            options.max_pages
        )));
    }

    if options.max_concurrency < 1 || options.max_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be between 1 and 100, got {}",
            options.max_concurrency
        )));
    }

    if options.frontier_capacity < 1 {
        return Err(ConfigError::Validation(format!(
            "frontier_capacity must be >= 1, got {}",
            options.frontier_capacity
        )));
    }

    if options.robots_user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "robots_user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Compiles every pattern once, rejecting blanks and invalid regexes
///
/// An empty list means "match everything"; a blank entry inside the list is
/// an error.
pub fn compile_patterns(kind: &str, patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            if pattern.trim().is_empty() {
                return Err(ConfigError::InvalidPattern(format!(
                    "{} pattern cannot be empty; omit the list to match all URLs",
                    kind
                )));
            }

            Regex::new(pattern).map_err(|e| {
                ConfigError::InvalidPattern(format!("{} pattern '{}': {}", kind, pattern, e))
            })
        })
        .collect()
}

fn validate_patterns(kind: &str, patterns: &[String]) -> Result<(), ConfigError> {
    compile_patterns(kind, patterns).map(|_| ())
}

/// Validates fetch options on their own, as used for single-page scrapes
pub fn validate_fetch_options(options: &FetchOptions) -> Result<(), ConfigError> {
    if options.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeout_ms must be greater than zero".to_string(),
        ));
    }

    if options.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    for (name, value) in &options.headers {
        if reqwest::header::HeaderName::from_bytes(name.as_bytes()).is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid header name: '{}'",
                name
            )));
        }
        if reqwest::header::HeaderValue::from_str(value).is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid value for header '{}'",
                name
            )));
        }
    }

    Ok(())
}
