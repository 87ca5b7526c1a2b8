//! Output module for emitted notices and run statistics
//!
//! This module handles:
//! - The `NoticeSink` seam the coordinator writes records to
//! - JSON Lines serialization of notice records
//! - Crawl counters and their console report

mod jsonl;
pub mod stats;
mod traits;

pub use jsonl::JsonLinesWriter;
pub use stats::{print_statistics, CrawlStats};
pub use traits::{NoticeSink, OutputError, OutputResult};
