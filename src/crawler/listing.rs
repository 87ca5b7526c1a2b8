//! Listing page parser
//!
//! Board markup is not uniform across rows, so both the detail link and the
//! date token are located by trying a short list of matchers in priority
//! order. A link matcher hits when it finds an anchor; a positional date
//! matcher hits only when its cell actually holds a date.
//!
//! Row shape this is written against:
//!
//! ```html
//! <ul class="board-list-wrap">
//!   <li>
//!     <dl>
//!       <dt><a href="?mode=view&articleNo=1" title="자세히 보기">Title</a></dt>
//!       <dd class="board-list-content-info">
//!         <ul><li>No. 1</li><li>Writer</li><li>2025-08-28</li><li>Views 10</li></ul>
//!       </dd>
//!     </dl>
//!   </li>
//! </ul>
//! ```

use crate::date::extract_date;
use crate::model::ListingEntry;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Link label used by the board for its "view detail" affordance
pub const VIEW_DETAIL_LABEL: &str = "자세히 보기";

static ROW: LazyLock<Selector> = LazyLock::new(|| selector("ul.board-list-wrap > li"));

static LABELLED_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector("dl > dt > a[title='자세히 보기'][href]"));
static ARTICLE_NO_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector("dl > dt > a[href*='articleNo']"));
static VIEW_MODE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("dl dt a[href^='?mode=view']"));

static CONTENT_INFO_DATE: LazyLock<Selector> =
    LazyLock::new(|| selector("dl > dd.board-list-content-info > ul > li:nth-of-type(3)"));
static HEADING_DATE: LazyLock<Selector> =
    LazyLock::new(|| selector("dl > dt ul > li:nth-of-type(3)"));
static DEFINITION_LIST: LazyLock<Selector> = LazyLock::new(|| selector("dl"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e:?}"))
}

type LinkMatcher = fn(ElementRef<'_>) -> Option<ElementRef<'_>>;
type DateMatcher = fn(ElementRef<'_>) -> Option<String>;

const LINK_MATCHERS: [LinkMatcher; 3] = [labelled_link, article_no_link, view_mode_link];
const POSITIONAL_DATE_MATCHERS: [DateMatcher; 2] = [content_info_date, heading_date];

/// Result of parsing one listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Number of row nodes found on the page
    pub rows_seen: usize,

    /// Entries for rows with a usable detail link, in page order
    pub entries: Vec<ListingEntry>,
}

impl ListingPage {
    /// Rows dropped because no detail link was found
    pub fn rows_skipped(&self) -> usize {
        self.rows_seen - self.entries.len()
    }
}

/// Parses every `ul.board-list-wrap > li` row of a listing page
pub fn parse_listing(html: &str) -> ListingPage {
    let document = Html::parse_document(html);
    let mut page = ListingPage::default();

    for row in document.select(&ROW) {
        page.rows_seen += 1;
        if let Some(entry) = parse_row(row) {
            page.entries.push(entry);
        }
    }

    page
}

/// Extracts link, title and raw date text from one listing row
///
/// Returns `None` when none of the link patterns match; such rows are
/// usually ads or separators. A missing title or date is not a skip.
pub fn parse_row(row: ElementRef<'_>) -> Option<ListingEntry> {
    let anchor = LINK_MATCHERS.iter().find_map(|matcher| matcher(row))?;
    let detail_link = anchor.value().attr("href")?.trim().to_string();
    if detail_link.is_empty() {
        return None;
    }

    let title = anchor_title(anchor);
    let raw_date_text = POSITIONAL_DATE_MATCHERS
        .iter()
        .filter_map(|matcher| matcher(row))
        .find(|text| extract_date(text).is_some())
        .or_else(|| definition_list_text(row))
        .unwrap_or_default();

    Some(ListingEntry {
        detail_link,
        title,
        raw_date_text,
    })
}

fn labelled_link(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.select(&LABELLED_LINK).next()
}

fn article_no_link(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.select(&ARTICLE_NO_LINK).next()
}

fn view_mode_link(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.select(&VIEW_MODE_LINK).next()
}

/// Joins the anchor's text fragments, dropping the "view detail" label
fn anchor_title(anchor: ElementRef<'_>) -> String {
    anchor
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty() && *fragment != VIEW_DETAIL_LABEL)
        .collect::<Vec<_>>()
        .join(" ")
}

fn content_info_date(row: ElementRef<'_>) -> Option<String> {
    first_text(row, &CONTENT_INFO_DATE)
}

fn heading_date(row: ElementRef<'_>) -> Option<String> {
    first_text(row, &HEADING_DATE)
}

/// Last resort: everything in the row's definition list, left for date scanning
fn definition_list_text(row: ElementRef<'_>) -> Option<String> {
    let dl = row.select(&DEFINITION_LIST).next()?;
    let blob = joined_text(dl);
    (!blob.is_empty()).then_some(blob)
}

fn first_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = row.select(selector).next()?;
    let text = joined_text(element);
    (!text.is_empty()).then_some(text)
}

fn joined_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves a detail link against the listing page URL
///
/// Returns None for links that cannot lead to a detail page:
/// - javascript:, mailto:, tel: and data: links
/// - fragment-only links
/// - anything that is not http(s) after resolution
pub fn resolve_detail_url(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    matches!(absolute.scheme(), "http" | "https").then_some(absolute)
}

/// Builds the URLs of the first `pages` listing pages
///
/// A single page is fetched exactly as configured. For more pages the board's
/// `mode=list`, `articleLimit` and `article.offset` parameters are set on
/// every URL, replacing any values already present.
pub fn listing_page_urls(base: &Url, pages: u32, page_size: u32) -> Vec<Url> {
    if pages <= 1 {
        return vec![base.clone()];
    }

    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| !matches!(key.as_ref(), "mode" | "articleLimit" | "article.offset"))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    (0..pages)
        .map(|page| {
            let mut url = base.clone();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(&retained)
                .append_pair("mode", "list")
                .append_pair("articleLimit", &page_size.to_string())
                .append_pair("article.offset", &(u64::from(page) * u64::from(page_size)).to_string());
            url
        })
        .collect()
}
