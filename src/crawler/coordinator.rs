//! Crawler coordinator - listing to detail orchestration
//!
//! For every listing page:
//! 1. Fetch the page and parse its rows
//! 2. Resolve each entry's posting date and apply the date range
//! 3. Fetch the surviving detail pages concurrently
//! 4. Normalize each body and emit a `NoticeRecord` in listing order
//!
//! Nothing here retries or aborts the run on a failed page; failures are
//! logged and counted in `CrawlStats`.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::content::{normalize, select_body_html};
use crate::crawler::fetcher::{FetchError, FetchedPage, HttpFetcher, PageFetcher};
use crate::crawler::listing::{listing_page_urls, parse_listing, resolve_detail_url, ListingPage};
use crate::date::{extract_date, DateRange};
use crate::model::NoticeRecord;
use crate::output::{CrawlStats, NoticeSink};
use crate::NoticeError;
use chrono::NaiveDate;
use scraper::Html;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// A detail page to fetch, with the metadata taken from its listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowRequest {
    /// Absolute detail URL
    pub url: Url,

    /// Title from the listing row
    pub title: String,

    /// Posting date from the listing row, if one was found
    pub posted: Option<NaiveDate>,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    listing_urls: Vec<Url>,
    range: DateRange,
    max_concurrent_details: usize,
}

impl Coordinator {
    /// Creates a coordinator around an arbitrary fetcher
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of listing and detail pages
    /// * `crawler` - Listing URL, paging and concurrency settings
    /// * `range` - Posting-date filter for this run
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        crawler: &CrawlerConfig,
        range: DateRange,
    ) -> Result<Self, NoticeError> {
        let base = Url::parse(&crawler.listing_url)?;
        let listing_urls = listing_page_urls(&base, crawler.pages, crawler.page_size);

        Ok(Self {
            fetcher,
            listing_urls,
            range,
            max_concurrent_details: crawler.max_concurrent_details.max(1) as usize,
        })
    }

    /// Creates a coordinator that fetches over HTTP
    pub fn from_config(config: &Config, range: DateRange) -> Result<Self, NoticeError> {
        let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
        Self::new(Arc::new(fetcher), &config.crawler, range)
    }

    /// Listing pages this coordinator will walk
    pub fn listing_urls(&self) -> &[Url] {
        &self.listing_urls
    }

    /// Runs the crawl over every listing page
    ///
    /// Only a sink failure stops the run early.
    pub async fn run(&self, sink: &mut dyn NoticeSink) -> Result<CrawlStats, NoticeError> {
        let mut stats = CrawlStats::default();
        let start_time = std::time::Instant::now();

        for listing_url in &self.listing_urls {
            stats += self.crawl_listing(listing_url, sink).await?;
        }

        sink.finish()?;

        tracing::info!(
            "Crawl completed: {} of {} rows emitted from {} listing page(s) in {:?}",
            stats.emitted,
            stats.rows_seen,
            stats.listing_pages,
            start_time.elapsed()
        );

        Ok(stats)
    }

    /// Crawls one listing page and all detail pages it leads to
    pub async fn crawl_listing(
        &self,
        listing_url: &Url,
        sink: &mut dyn NoticeSink,
    ) -> Result<CrawlStats, NoticeError> {
        let mut stats = CrawlStats::default();

        let listing = match self.fetcher.fetch_page(listing_url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to fetch listing page: {}", e);
                stats.listing_failures += 1;
                return Ok(stats);
            }
        };
        stats.listing_pages += 1;

        // Relative detail links resolve against where the listing actually came from
        let base = Url::parse(&listing.url).unwrap_or_else(|_| listing_url.clone());
        let page = parse_listing(&listing.body);
        tracing::info!("{}: {} rows", base, page.rows_seen);

        let (requests, plan_stats) = plan_follow_requests(&page, &base, &self.range);
        stats += plan_stats;

        let requested = requests.len();
        let outcomes = self.fetch_details(requests).await;
        // Tasks that panicked or were cancelled return nothing
        stats.detail_failures += (requested - outcomes.len()) as u64;

        for (request, result) in outcomes {
            match result {
                Ok(detail) => {
                    let (record, has_body) = build_record(&request, &detail);
                    if !has_body {
                        tracing::warn!("Body selector miss: {}", detail.url);
                        stats.missing_bodies += 1;
                    }
                    sink.emit(&record)?;
                    stats.emitted += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch detail page: {}", e);
                    stats.detail_failures += 1;
                }
            }
        }

        Ok(stats)
    }

    /// Fetches detail pages concurrently, returning results in request order
    async fn fetch_details(
        &self,
        requests: Vec<FollowRequest>,
    ) -> Vec<(FollowRequest, Result<FetchedPage, FetchError>)> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_details));
        let mut tasks = JoinSet::new();

        for (index, request) in requests.into_iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result = fetcher.fetch_page(request.url.as_str()).await;
                (index, request, result)
            });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::error!("Detail fetch task failed: {}", e),
            }
        }

        outcomes.sort_by_key(|(index, _, _)| *index);
        outcomes
            .into_iter()
            .map(|(_, request, result)| (request, result))
            .collect()
    }
}

/// Turns parsed listing entries into detail fetches
///
/// Entries rejected by `range` count as filtered; entries whose link does not
/// resolve to an http(s) URL count as skipped rows, like rows without a link.
pub fn plan_follow_requests(
    page: &ListingPage,
    base: &Url,
    range: &DateRange,
) -> (Vec<FollowRequest>, CrawlStats) {
    let mut stats = CrawlStats {
        rows_seen: page.rows_seen as u64,
        rows_skipped: page.rows_skipped() as u64,
        ..Default::default()
    };
    let mut requests = Vec::with_capacity(page.entries.len());

    for entry in &page.entries {
        let posted = extract_date(&entry.raw_date_text);
        if range.excludes(posted) {
            tracing::debug!("Filtered by date ({:?}): {}", posted, entry.title);
            stats.filtered_out += 1;
            continue;
        }

        let Some(url) = resolve_detail_url(&entry.detail_link, base) else {
            tracing::debug!("Unresolvable detail link: {:?}", entry.detail_link);
            stats.rows_skipped += 1;
            continue;
        };

        requests.push(FollowRequest {
            url,
            title: entry.title.clone(),
            posted,
        });
    }

    (requests, stats)
}

/// Builds the record for a fetched detail page
///
/// The second value is false when no body container was found; the record
/// is still produced, with empty content.
pub fn build_record(request: &FollowRequest, detail: &FetchedPage) -> (NoticeRecord, bool) {
    let body_html = select_body_html(&Html::parse_document(&detail.body));
    let has_body = body_html.is_some();
    let content = body_html.as_deref().map(normalize).unwrap_or_default();

    let record = NoticeRecord::new(&request.title, &detail.url, request.posted, content);
    (record, has_body)
}

/// Runs a complete crawl over HTTP with the given date range
///
/// # Example
///
/// ```no_run
/// use uni_notice::config::load_config;
/// use uni_notice::crawler::run_crawl;
/// use uni_notice::output::JsonLinesWriter;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("uni-notice.toml"))?;
/// let (range, _warnings) = config.filter.date_range();
/// let mut sink = JsonLinesWriter::create(Path::new(&config.output.jsonl_path))?;
/// let stats = run_crawl(&config, range, &mut sink).await?;
/// println!("{} notices", stats.emitted);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    range: DateRange,
    sink: &mut dyn NoticeSink,
) -> Result<CrawlStats, NoticeError> {
    let coordinator = Coordinator::from_config(config, range)?;
    coordinator.run(sink).await
}
