//! HTTP fetcher implementation
//!
//! The extraction stages never touch the network. Everything that does goes
//! through the `PageFetcher` trait so the coordinator can be driven by a
//! mock in tests. `HttpFetcher` is the reqwest-backed implementation.

use crate::config::{CrawlerConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,

    /// Page body content
    pub body: String,
}

/// Reasons a page could not be fetched
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Expected HTML from {url}, got {content_type:?}")]
    ContentMismatch { url: String, content_type: String },
}

/// Source of listing and detail pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its body together with the resolved URL
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use uni_notice::config::UserAgentConfig;
/// use uni_notice::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "UniNotice".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, 30).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent_string())
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
///
/// Redirects are followed by the client; the reported URL is the final one.
/// Failures are returned as-is, there is no retry.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from crawler and user agent settings
    pub fn from_config(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, crawler.request_timeout_secs)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            return Err(FetchError::Http {
                url: final_url,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // A missing content-type is accepted
        if !content_type.is_empty() && !content_type.contains("html") {
            return Err(FetchError::ContentMismatch {
                url: final_url,
                content_type,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(&final_url, e))?;

        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if let Some(status) = error.status() {
        FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
