//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small notice board and run the full
//! listing -> filter -> detail -> JSON Lines cycle over real HTTP.

use uni_notice::config::{Config, CrawlerConfig, FilterConfig, OutputConfig, UserAgentConfig};
use uni_notice::crawler::Coordinator;
use uni_notice::output::{JsonLinesWriter, NoticeSink};
use uni_notice::{DateRange, NoticeRecord};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock board
fn create_test_config(listing_url: &str, filter: FilterConfig) -> Config {
    Config {
        crawler: CrawlerConfig {
            listing_url: listing_url.to_string(),
            pages: 1,
            page_size: 10,
            max_concurrent_details: 2,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            jsonl_path: "./unused.jsonl".to_string(),
        },
        filter,
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

const LISTING: &str = r#"<html><body>
<ul class="board-list-wrap">
  <li><dl>
    <dt><a href="?mode=view&amp;articleNo=101" title="자세히 보기">  Notice  <span>자세히 보기</span></a></dt>
    <dd class="board-list-content-info"><ul><li>101</li><li>학사팀</li><li>2025-08-28</li><li>조회 10</li></ul></dd>
  </dl></li>
  <li><dl>
    <dt><a href="?mode=view&amp;articleNo=102" title="자세히 보기">Old notice</a></dt>
    <dd class="board-list-content-info"><ul><li>102</li><li>학사팀</li><li>2025.07.01</li></ul></dd>
  </dl></li>
  <li><dl>
    <dt><a href="/board/notice.do?articleNo=103">Odd markup</a></dt>
    <dd><span>작성일 2025/8/5</span></dd>
  </dl></li>
  <li><dl>
    <dt><a href="?mode=view&amp;articleNo=104" title="자세히 보기">No date at all</a></dt>
  </dl></li>
  <li><dl><dt><a href="/banner">Sponsored</a></dt></dl></li>
</ul>
</body></html>"#;

async fn mount_board(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/board/notice.do"))
        .and(query_param("articleNo", "101"))
        .respond_with(html(
            r#"<html><body><div class="board-view"><div class="content">
                <p>첫 줄</p><p>둘째 줄</p><script>track()</script>
            </div></div></body></html>"#
                .to_string(),
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/board/notice.do"))
        .and(query_param("articleNo", "102"))
        .respond_with(html("<html><body><div class=\"bbs_view\">old</div></body></html>".to_string()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/board/notice.do"))
        .and(query_param("articleNo", "103"))
        .respond_with(html(
            "<html><body><div id=\"content\"><div class=\"view\">A<br>B</div></div></body></html>"
                .to_string(),
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/board/notice.do"))
        .and(query_param("articleNo", "104"))
        .respond_with(html("<html><body><p>nothing to select</p></body></html>".to_string()))
        .mount(server)
        .await;

    // Listing last: it has no query parameters to match on
    Mock::given(method("GET"))
        .and(path("/board/notice.do"))
        .respond_with(html(LISTING.to_string()))
        .mount(server)
        .await;
}

async fn crawl(filter: FilterConfig) -> (Vec<NoticeRecord>, uni_notice::output::CrawlStats, String) {
    let server = MockServer::start().await;
    mount_board(&server).await;

    let listing_url = format!("{}/board/notice.do", server.uri());
    let config = create_test_config(&listing_url, filter);
    let (range, warnings) = config.filter.date_range();
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);

    let coordinator = Coordinator::from_config(&config, range).expect("Failed to create coordinator");
    let mut sink: Vec<NoticeRecord> = Vec::new();
    let stats = coordinator.run(&mut sink).await.expect("Crawl failed");

    (sink, stats, server.uri())
}

#[tokio::test]
async fn test_full_crawl_without_filter() {
    let (records, stats, base) = crawl(FilterConfig::default()).await;

    let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Notice", "Old notice", "Odd markup", "No date at all"]);

    let first = &records[0];
    assert_eq!(first.url, format!("{base}/board/notice.do?mode=view&articleNo=101"));
    assert_eq!(first.posted_at.as_deref(), Some("2025-08-28"));
    assert_eq!(first.content, "첫 줄\n둘째 줄");
    assert!(first.writer.is_none());
    assert!(first.attachments.is_empty());

    // Date found by scanning the whole row
    assert_eq!(records[2].posted_at.as_deref(), Some("2025-08-05"));
    assert_eq!(records[2].content, "A\nB");

    assert_eq!(records[3].posted_at, None);
    assert_eq!(records[3].content, "");

    assert_eq!(stats.rows_seen, 5);
    assert_eq!(stats.rows_skipped, 1);
    assert_eq!(stats.missing_bodies, 1);
    assert_eq!(stats.emitted, 4);
}

#[tokio::test]
async fn test_crawl_with_date_range() {
    let filter = FilterConfig {
        date_from: Some("2025-08-01".to_string()),
        date_to: Some("2025-08-31".to_string()),
        include_undated: Some("no".to_string()),
    };
    let (records, stats, _) = crawl(filter).await;

    let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Notice", "Odd markup"]);
    assert_eq!(stats.filtered_out, 2);
    assert_eq!(stats.detail_requests(), 2);
}

#[tokio::test]
async fn test_inverted_range_keeps_only_undated() {
    let (range, warnings) = DateRange::from_operator(Some("2025-09-01"), Some("2025-08-01"), None);
    assert_eq!(warnings.len(), 1);

    let server = MockServer::start().await;
    mount_board(&server).await;
    let config = create_test_config(
        &format!("{}/board/notice.do", server.uri()),
        FilterConfig::default(),
    );

    let coordinator = Coordinator::from_config(&config, range).unwrap();
    let mut sink: Vec<NoticeRecord> = Vec::new();
    coordinator.run(&mut sink).await.unwrap();

    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].title, "No date at all");
}

#[tokio::test]
async fn test_listing_http_error_yields_no_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = create_test_config(
        &format!("{}/board/notice.do", server.uri()),
        FilterConfig::default(),
    );
    let coordinator = Coordinator::from_config(&config, DateRange::default()).unwrap();
    let mut sink: Vec<NoticeRecord> = Vec::new();
    let stats = coordinator.run(&mut sink).await.unwrap();

    assert!(sink.is_empty());
    assert_eq!(stats.listing_failures, 1);
}

#[tokio::test]
async fn test_crawl_writes_json_lines() {
    let server = MockServer::start().await;
    mount_board(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("notices.jsonl");
    let config = create_test_config(
        &format!("{}/board/notice.do", server.uri()),
        FilterConfig::default(),
    );

    let mut sink = JsonLinesWriter::create(&out_path).unwrap();
    let coordinator = Coordinator::from_config(&config, DateRange::default()).unwrap();
    let stats = coordinator.run(&mut sink).await.unwrap();
    sink.finish().unwrap();

    let content = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len() as u64, stats.emitted);
    for line in &lines {
        for field in ["title", "url", "writer", "posted_at", "content", "attachments"] {
            assert!(line.get(field).is_some(), "missing field {field}");
        }
    }
    assert_eq!(lines[0]["title"], "Notice");
}
