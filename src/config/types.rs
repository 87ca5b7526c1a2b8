use crate::date::{ConfigWarning, DateRange};
use serde::Deserialize;

/// Main configuration structure for Uni-Notice
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// First listing page of the notice board
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Number of listing pages to walk
    #[serde(default = "default_pages")]
    pub pages: u32,

    /// Rows per listing page requested from the board
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Maximum number of detail pages fetched at once
    #[serde(
        rename = "max-concurrent-details",
        default = "default_max_concurrent_details"
    )]
    pub max_concurrent_details: u32,

    /// Per-request timeout (seconds)
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,
}

fn default_pages() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

fn default_max_concurrent_details() -> u32 {
    4
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn user_agent_string(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON Lines file notices are written to
    #[serde(rename = "jsonl-path")]
    pub jsonl_path: String,
}

/// Posting-date filter as typed by the operator
///
/// Values are kept as raw strings; they are interpreted by
/// `FilterConfig::date_range`, which never fails.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Lower bound, `YYYY-MM-DD`
    #[serde(rename = "date-from")]
    pub date_from: Option<String>,

    /// Upper bound, `YYYY-MM-DD`
    #[serde(rename = "date-to")]
    pub date_to: Option<String>,

    /// Whether notices without a recognizable date are kept (`yes`/`no`)
    #[serde(rename = "include-undated")]
    pub include_undated: Option<String>,
}

impl FilterConfig {
    /// Resolves the raw settings into a `DateRange` plus any warnings
    pub fn date_range(&self) -> (DateRange, Vec<ConfigWarning>) {
        DateRange::from_operator(
            self.date_from.as_deref(),
            self.date_to.as_deref(),
            self.include_undated.as_deref(),
        )
    }
}
