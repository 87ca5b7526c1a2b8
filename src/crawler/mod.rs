//! Crawler module for notice board extraction
//!
//! This module contains the extraction pipeline and its orchestration:
//! - Listing row parsing (links, titles, raw date tokens)
//! - Detail body selection and HTML-to-text normalization
//! - The `PageFetcher` seam and its HTTP implementation
//! - The coordinator that sequences listing, filtering and detail fetches

mod content;
mod coordinator;
mod fetcher;
mod listing;

pub use content::{normalize, select_body_html};
pub use coordinator::{build_record, plan_follow_requests, run_crawl, Coordinator, FollowRequest};
pub use fetcher::{build_http_client, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use listing::{
    listing_page_urls, parse_listing, parse_row, resolve_detail_url, ListingPage,
    VIEW_DETAIL_LABEL,
};
