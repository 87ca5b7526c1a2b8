//! Output sink trait and errors
//!
//! The coordinator hands every finished `NoticeRecord` to a `NoticeSink`.
//! Serialization format and destination are the sink's business.

use crate::model::NoticeRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receiver of emitted notices
pub trait NoticeSink {
    /// Accepts one finished record
    fn emit(&mut self, record: &NoticeRecord) -> OutputResult<()>;

    /// Flushes anything buffered; called once after the crawl
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// Collects records in memory
impl NoticeSink for Vec<NoticeRecord> {
    fn emit(&mut self, record: &NoticeRecord) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }
}
