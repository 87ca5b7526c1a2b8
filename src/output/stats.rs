//! Per-run crawl counters
//!
//! Counters are filled in by the coordinator and printed by the binary.
//! They are the observability side of the "produce fewer records, never
//! crash" policy: every dropped row or page lands in one of these buckets.

use std::ops::AddAssign;

/// Counts collected during one crawl run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Listing pages fetched and parsed
    pub listing_pages: u64,

    /// Listing pages that could not be fetched
    pub listing_failures: u64,

    /// Listing rows found
    pub rows_seen: u64,

    /// Rows without a usable detail link
    pub rows_skipped: u64,

    /// Entries dropped by the date filter
    pub filtered_out: u64,

    /// Detail pages that could not be fetched
    pub detail_failures: u64,

    /// Detail pages with no recognizable body container
    pub missing_bodies: u64,

    /// Records handed to the sink
    pub emitted: u64,
}

impl CrawlStats {
    /// Entries that passed the filter and were sent for detail fetching
    pub fn detail_requests(&self) -> u64 {
        self.rows_seen
            .saturating_sub(self.rows_skipped)
            .saturating_sub(self.filtered_out)
    }

    /// Share of seen rows that became records, as a percentage
    pub fn yield_rate(&self) -> f64 {
        if self.rows_seen == 0 {
            return 0.0;
        }
        (self.emitted as f64 / self.rows_seen as f64) * 100.0
    }
}

impl AddAssign for CrawlStats {
    fn add_assign(&mut self, other: Self) {
        self.listing_pages += other.listing_pages;
        self.listing_failures += other.listing_failures;
        self.rows_seen += other.rows_seen;
        self.rows_skipped += other.rows_skipped;
        self.filtered_out += other.filtered_out;
        self.detail_failures += other.detail_failures;
        self.missing_bodies += other.missing_bodies;
        self.emitted += other.emitted;
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Listing:");
    println!("  Pages parsed: {}", stats.listing_pages);
    println!("  Pages failed: {}", stats.listing_failures);
    println!("  Rows seen: {}", stats.rows_seen);
    println!("  Rows without link: {}", stats.rows_skipped);
    println!("  Filtered by date: {}", stats.filtered_out);
    println!();

    println!("Detail pages:");
    println!("  Requested: {}", stats.detail_requests());
    println!("  Failed: {}", stats.detail_failures);
    println!("  Missing body: {}", stats.missing_bodies);
    println!();

    println!(
        "Yield: {:.1}% ({} / {} rows emitted)",
        stats.yield_rate(),
        stats.emitted,
        stats.rows_seen
    );
}
