//! Records passed between the pipeline stages

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One notice summary extracted from a listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Detail link as written in the listing (relative or absolute)
    pub detail_link: String,

    /// Cleaned title, possibly empty
    pub title: String,

    /// Unparsed text suspected to contain the posting date, possibly empty
    pub raw_date_text: String,
}

/// A fully extracted notice, ready for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeRecord {
    /// Notice title
    pub title: String,

    /// Absolute URL of the detail page
    pub url: String,

    /// Author; reserved and never filled by the crawler
    pub writer: Option<String>,

    /// Posting date as `YYYY-MM-DD`
    pub posted_at: Option<String>,

    /// Normalized plain-text body
    pub content: String,

    /// Attachment links; always empty for now
    pub attachments: Vec<String>,
}

impl NoticeRecord {
    /// Builds a record for an accepted listing entry and its normalized body
    pub fn new(title: &str, url: &str, posted: Option<NaiveDate>, content: String) -> Self {
        Self {
            title: title.trim().to_string(),
            url: url.to_string(),
            writer: None,
            posted_at: posted.map(|d| d.format("%Y-%m-%d").to_string()),
            content,
            attachments: Vec::new(),
        }
    }
}
