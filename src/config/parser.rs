use crate::config::types::CrawlOptions;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads crawl options from a TOML file and validates them
///
/// Keys are kebab-case and every key is optional; missing keys take their
/// defaults.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use ripple_crawl::config::load_config;
///
/// let options = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Max pages: {}", options.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<CrawlOptions, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates crawl options from TOML text
pub fn parse_config(content: &str) -> Result<CrawlOptions, ConfigError> {
    let options: CrawlOptions = toml::from_str(content)?;
    validate(&options)?;
    Ok(options)
}
