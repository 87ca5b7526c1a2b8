//! Detail page body extraction and HTML-to-text normalization

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

/// Body containers recognized on a detail page, queried as one selector group
const BODY_SELECTORS: [&str; 9] = [
    ".board-view .content",
    ".board_view .content",
    ".bbs_view",
    ".article",
    ".post-content",
    ".view .content",
    "#content .view",
    "#content .article",
    "div.content",
];

static BODY_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&BODY_SELECTORS.join(", ")).expect("Failed to compile body container selector")
});

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\b[^>]*>").expect("Failed to compile line break regex"));

static BLOCK_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|li|tr)\s*>").expect("Failed to compile block close regex")
});

static TRAILING_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("Failed to compile trailing space regex"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Failed to compile blank run regex"));

/// Returns the outer HTML of the first body container in document order, if any
///
/// The selectors form one group, so an element matching a later entry wins
/// over one matching an earlier entry when it appears first in the page.
pub fn select_body_html(document: &Html) -> Option<String> {
    document
        .select(&BODY_CONTAINER)
        .next()
        .map(|element| element.html())
}

/// Converts a raw HTML body fragment into plain text
///
/// Line structure is taken from the markup before parsing: `<br>` and the
/// closing tags of paragraphs, list items and table rows become newlines.
/// Text inside `<script>` and `<style>` is dropped. Each remaining text node
/// is trimmed and non-empty ones are joined by newlines; runs of three or
/// more newlines are collapsed to one blank line.
///
/// # Example
///
/// ```
/// use uni_notice::crawler::normalize;
///
/// assert_eq!(normalize("<p>Line1</p><p>Line2</p>"), "Line1\nLine2");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw_html: &str) -> String {
    if raw_html.trim().is_empty() {
        return String::new();
    }

    let marked = LINE_BREAK_RE.replace_all(raw_html, "\n");
    let marked = BLOCK_CLOSE_RE.replace_all(&marked, "\n");

    let fragment = Html::parse_fragment(&marked);
    let text = visible_text(fragment.root_element())
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let text = TRAILING_SPACE_RE.replace_all(&text, "\n");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Text nodes in document order, skipping script and style subtrees
fn visible_text(root: ElementRef<'_>) -> Vec<&str> {
    root.descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| matches!(el.name(), "script" | "style"))
                });
                (!hidden).then_some(&**text)
            }
            _ => None,
        })
        .collect()
}
