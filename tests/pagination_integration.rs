//! Integration tests for the HTTP client and pagination driver using wiremock

use chrono::DateTime;
use pagure_stats::facts::{Client, FailureCause, Mode, TimeWindow, aggregate_closed, aggregate_open, collect, issues_url, parse_base_url};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAY: i64 = 86_400;
const SINCE: i64 = 1_638_316_800; // 01.12.2021
const TILL: i64 = SINCE + 30 * DAY;

fn window() -> TimeWindow {
    TimeWindow::new(DateTime::from_timestamp(SINCE, 0).unwrap(), DateTime::from_timestamp(TILL, 0).unwrap()).unwrap()
}

fn start_url(server: &MockServer, mode: Mode) -> String {
    let base = parse_base_url(&server.uri()).unwrap();
    issues_url(&base, "test", mode, window().since(), None).unwrap().to_string()
}

/// A closed issue as the tracker returns it, timestamps as strings.
fn closed_issue(id: u64, created: i64, closed: i64, status: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": format!("Issue {id}"),
        "status": "Closed",
        "date_created": created.to_string(),
        "closed_at": closed.to_string(),
        "close_status": status,
        "tags": tags,
    })
}

fn page_body(issues: Vec<Value>, next: Option<String>) -> Value {
    json!({
        "args": {"status": "Closed"},
        "issues": issues,
        "total_issues": 0,
        "pagination": {"next": next, "page": 1, "pages": 3, "per_page": 20},
    })
}

async fn mount_page(server: &MockServer, page_path: &str, body: Value, expected_requests: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_requests)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_three_page_chain() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(
        &server,
        "/api/0/test/issues",
        page_body(
            vec![
                closed_issue(1, SINCE - 2 * DAY, SINCE + DAY, "Fixed", &["low-gain", "ops"]),
                closed_issue(2, SINCE, SINCE + 4 * DAY, "Duplicate", &[]),
            ],
            Some(format!("{uri}/page2")),
        ),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page2",
        page_body(vec![closed_issue(3, SINCE, SINCE + 7 * DAY, "Fixed", &["high-trouble", "dev"])], Some(format!("{uri}/page3"))),
        1,
    )
    .await;
    mount_page(&server, "/page3", page_body(vec![closed_issue(4, SINCE, SINCE + 10 * DAY, "Fixed", &[])], None), 1).await;

    let client = Client::new().unwrap();
    let outcome = aggregate_closed(&client, &start_url(&server, Mode::Closed), &window()).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.pages_fetched, 3);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);

    let stats = &outcome.stats;
    assert_eq!(stats.total, 4);
    assert_eq!(stats.closed_count, 4);
    assert_eq!(stats.resolution_counts.get("Fixed"), Some(&3));
    assert_eq!(stats.resolution_counts.get("Duplicate"), Some(&1));
    assert_eq!(stats.min_ttc, 3);
    assert_eq!(stats.max_ttc, 10);
    assert!((stats.avg_ttc - 6.0).abs() < 1e-9);
    assert!((stats.median_ttc - 5.5).abs() < 1e-9);
    assert_eq!(stats.gain_counts.low, 1);
    assert_eq!(stats.gain_counts.no_tag, 3);
    assert_eq!(stats.trouble_counts.high, 1);
    assert_eq!(stats.ops_count, 1);
    assert_eq!(stats.dev_count, 1);
}

#[tokio::test]
async fn test_start_url_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/test/issues"))
        .and(query_param("status", "all"))
        .and(query_param("since", SINCE.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(Vec::new(), None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new().unwrap();
    let outcome = aggregate_open(&client, &start_url(&server, Mode::Open), &window()).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.stats.total, 0);
}

#[tokio::test]
async fn test_server_error_on_second_page() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(
        &server,
        "/api/0/test/issues",
        page_body(vec![closed_issue(1, SINCE, SINCE + 2 * DAY, "Fixed", &[])], Some(format!("{uri}/page2"))),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    mount_page(&server, "/page3", page_body(Vec::new(), None), 0).await;

    let client = Client::new().unwrap();
    let outcome = aggregate_closed(&client, &start_url(&server, Mode::Closed), &window()).await;

    assert!(!outcome.is_complete());
    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert_eq!(outcome.stats.total, 1);
    assert_eq!(outcome.stats.max_ttc, 2);

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.url, format!("{uri}/page2"));
    assert_eq!(failure.cause, FailureCause::Status(500));
}

#[tokio::test]
async fn test_invalid_body_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/test/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new().unwrap();
    let collection = collect(&client, &start_url(&server, Mode::Closed), Mode::Closed, &window()).await;

    assert!(!collection.is_complete());
    assert!(collection.facts.is_empty());
    assert!(matches!(collection.failure.unwrap().cause, FailureCause::Body(_)));
}

#[tokio::test]
async fn test_unreachable_server() {
    let server = MockServer::start().await;
    let url = start_url(&server, Mode::Closed);
    drop(server);

    let client = Client::new().unwrap();
    let collection = collect(&client, &url, Mode::Closed, &window()).await;

    assert_eq!(collection.pages_fetched, 1);
    assert!(matches!(collection.failure.unwrap().cause, FailureCause::Transport(_)));
}

#[tokio::test]
async fn test_window_boundaries_and_malformed_records() {
    let server = MockServer::start().await;

    let issues = vec![
        closed_issue(1, SINCE - DAY, SINCE, "Fixed", &[]),
        closed_issue(2, SINCE - DAY, TILL, "Fixed", &[]),
        closed_issue(3, SINCE - DAY, SINCE - 1, "Fixed", &[]),
        closed_issue(4, SINCE - DAY, TILL + 1, "Fixed", &[]),
        json!({"id": 5, "date_created": SINCE, "closed_at": null, "close_status": null, "tags": []}),
        json!({"id": "five", "tags": "not a list"}),
        json!({"id": 7, "date_created": SINCE, "closed_at": SINCE + DAY, "close_status": "Invalid"}),
    ];
    mount_page(&server, "/api/0/test/issues", page_body(issues, None), 1).await;

    let client = Client::new().unwrap();
    let collection = collect(&client, &start_url(&server, Mode::Closed), Mode::Closed, &window()).await;

    assert!(collection.is_complete());
    assert_eq!(collection.facts.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2, 7]);
    assert_eq!(collection.skipped, 4);
    assert_eq!(collection.facts[0].time_to_close_days, Some(1));
}
