use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates a TOML configuration file
///
/// Problems in the `[filter]` section never fail the load; see
/// `FilterConfig::date_range`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use uni_notice::config::load_config;
///
/// let config = load_config(Path::new("uni-notice.toml")).unwrap();
/// println!("Listing: {}", config.crawler.listing_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Reads and parses a TOML configuration file without validating it
///
/// Callers that layer overrides on top of the file call `validate` afterwards.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Hex-encoded SHA-256 of the configuration file content
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hex::encode(Sha256::digest(content.as_bytes())))
}

/// Reads an unvalidated configuration together with its hash
pub fn read_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = read_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
