//! Configuration module for Uni-Notice
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use uni_notice::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("uni-notice.toml")).unwrap();
//! println!("Crawler will walk {} listing page(s)", config.crawler.pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FilterConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, read_config, read_config_with_hash};
pub use validation::validate;
