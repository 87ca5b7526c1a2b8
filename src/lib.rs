//! Uni-Notice: a university announcement board crawler
//!
//! This crate enumerates the listing pages of a notice board, extracts per-notice
//! metadata from each listing row, filters notices by posting date, follows each
//! detail link and normalizes the notice body into plain text.
//!
//! The extraction stages (`crawler::parse_listing`, `date::extract_date`,
//! `crawler::normalize`) are pure functions; network access lives behind the
//! `crawler::PageFetcher` trait.

pub mod config;
pub mod crawler;
pub mod date;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for Uni-Notice operations
#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Uni-Notice operations
pub type Result<T> = std::result::Result<T, NoticeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use date::{extract_date, is_excluded, parse_operator_date, ConfigWarning, DateRange};
pub use model::{ListingEntry, NoticeRecord};
