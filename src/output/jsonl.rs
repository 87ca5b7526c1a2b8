use crate::model::NoticeRecord;
use crate::output::traits::{NoticeSink, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one JSON object per line
///
/// Field order follows `NoticeRecord`: `title`, `url`, `writer`,
/// `posted_at`, `content`, `attachments`.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    written: u64,
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> NoticeSink for JsonLinesWriter<W> {
    fn emit(&mut self, record: &NoticeRecord) -> OutputResult<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        tracing::debug!("Wrote {} records", self.written);
        Ok(())
    }
}
