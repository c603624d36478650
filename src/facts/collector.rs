//! Pagination driver: walks the issue collection page by page.

use super::extractor::{Extracted, extract};
use super::page::{FailureCause, FetchFailure, PageFetcher};
use super::{IssueFact, Mode, TimeWindow};
use std::collections::HashSet;

const LOG_TARGET: &str = "  collector";

/// Everything gathered while walking the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Facts extracted from every successfully fetched page, in page order.
    pub facts: Vec<IssueFact>,

    /// Number of fetch attempts, including a failed last one.
    pub pages_fetched: u32,

    /// Raw issues that did not produce a fact.
    pub skipped: u64,

    /// Set when collection stopped early because a page could not be fetched.
    pub failure: Option<FetchFailure>,
}

impl Collection {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Fetch `start_url` and every following page, extracting facts for `mode`.
///
/// Pages are fetched strictly one after the other. The walk ends when a page has no next
/// page, or at the first page that cannot be fetched; facts gathered up to that point are
/// kept and the failure is recorded in the returned [`Collection`].
pub async fn collect<F: PageFetcher>(fetcher: &F, start_url: &str, mode: Mode, window: &TimeWindow) -> Collection {
    let mut collection = Collection::default();
    let mut visited = HashSet::new();
    let mut next = Some(start_url.to_string());

    while let Some(url) = next.take() {
        if !visited.insert(url.clone()) {
            log::error!(target: LOG_TARGET, "Pagination loops back to '{url}', stopping");
            collection.failure = Some(FetchFailure {
                url,
                cause: FailureCause::RepeatedPage,
            });
            break;
        }

        log::debug!(target: LOG_TARGET, "Fetching page {} from '{url}'", collection.pages_fetched + 1);
        let page = fetcher.fetch(&url).await;
        collection.pages_fetched += 1;

        if let Some(failure) = page.failure {
            log::error!(target: LOG_TARGET, "Could not fetch page {}: {failure}", collection.pages_fetched);
            collection.failure = Some(failure);
            break;
        }

        for raw in &page.issues {
            match extract(raw, mode, window) {
                Extracted::Fact(fact) => collection.facts.push(fact),
                Extracted::Skipped(reason) => {
                    log::debug!(target: LOG_TARGET, "Skipping issue {}: {reason}", raw_id(raw));
                    collection.skipped += 1;
                }
            }
        }

        next = page.next_page_url;
    }

    log::info!(
        target: LOG_TARGET,
        "Collected {} {mode} issue(s) from {} page(s), skipped {}",
        collection.facts.len(),
        collection.pages_fetched,
        collection.skipped
    );

    collection
}

fn raw_id(raw: &serde_json::Value) -> String {
    raw.get("id").map_or_else(|| "<no id>".to_string(), |id| format!("#{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Page;
    use chrono::DateTime;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const DAY: i64 = 86_400;
    const SINCE: i64 = 1_600_000_000;
    const TILL: i64 = SINCE + 30 * DAY;

    /// Serves canned pages and records the URLs requested.
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, Page>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn with_page(mut self, url: &str, page: Page) -> Self {
            let _ = self.pages.insert(url.to_string(), page);
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Page {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .unwrap_or_else(|| Page::failed(url, FailureCause::Status(404)))
        }
    }

    fn window() -> TimeWindow {
        TimeWindow::new(DateTime::from_timestamp(SINCE, 0).unwrap(), DateTime::from_timestamp(TILL, 0).unwrap()).unwrap()
    }

    fn page(issues: Vec<serde_json::Value>, next: Option<&str>) -> Page {
        Page {
            issues,
            next_page_url: next.map(str::to_string),
            failure: None,
        }
    }

    fn closed_issue(id: u64, ttc_days: i64) -> serde_json::Value {
        json!({
            "id": id,
            "date_created": SINCE + DAY - ttc_days * DAY,
            "closed_at": SINCE + DAY,
            "close_status": "Fixed",
            "tags": [],
        })
    }

    #[tokio::test]
    async fn test_follows_every_page() {
        let fetcher = FakeFetcher::default()
            .with_page("p1", page(vec![closed_issue(1, 1), closed_issue(2, 2)], Some("p2")))
            .with_page("p2", page(vec![closed_issue(3, 3)], Some("p3")))
            .with_page("p3", page(vec![closed_issue(4, 4)], None));

        let collection = collect(&fetcher, "p1", Mode::Closed, &window()).await;

        assert!(collection.is_complete());
        assert_eq!(collection.pages_fetched, 3);
        assert_eq!(collection.skipped, 0);
        assert_eq!(collection.facts.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(fetcher.requests(), vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_single_empty_page() {
        let fetcher = FakeFetcher::default().with_page("p1", page(Vec::new(), None));

        let collection = collect(&fetcher, "p1", Mode::Open, &window()).await;

        assert!(collection.is_complete());
        assert_eq!(collection.pages_fetched, 1);
        assert!(collection.facts.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_pages() {
        let fetcher = FakeFetcher::default()
            .with_page("p1", page(vec![closed_issue(1, 5)], Some("p2")))
            .with_page("p2", Page::failed("p2", FailureCause::Status(500)))
            .with_page("p3", page(vec![closed_issue(3, 3)], None));

        let collection = collect(&fetcher, "p1", Mode::Closed, &window()).await;

        assert!(!collection.is_complete());
        assert_eq!(collection.pages_fetched, 2);
        assert_eq!(collection.facts.len(), 1);
        assert_eq!(fetcher.requests(), vec!["p1", "p2"]);

        let failure = collection.failure.unwrap();
        assert_eq!(failure.url, "p2");
        assert_eq!(failure.cause, FailureCause::Status(500));
    }

    #[tokio::test]
    async fn test_failure_on_first_page() {
        let fetcher = FakeFetcher::default();

        let collection = collect(&fetcher, "p1", Mode::Closed, &window()).await;

        assert!(!collection.is_complete());
        assert_eq!(collection.pages_fetched, 1);
        assert!(collection.facts.is_empty());
    }

    #[tokio::test]
    async fn test_skipped_issues_are_counted() {
        let outside = json!({"id": 10, "date_created": SINCE - 90 * DAY, "closed_at": SINCE - 60 * DAY});
        let still_open = json!({"id": 11, "date_created": SINCE + DAY, "closed_at": null});
        let malformed = json!({"id": "not a number"});

        let fetcher = FakeFetcher::default().with_page("p1", page(vec![closed_issue(1, 1), outside, still_open, malformed], None));

        let collection = collect(&fetcher, "p1", Mode::Closed, &window()).await;

        assert!(collection.is_complete());
        assert_eq!(collection.facts.len(), 1);
        assert_eq!(collection.skipped, 3);
    }

    #[tokio::test]
    async fn test_stops_when_pagination_loops() {
        let fetcher = FakeFetcher::default()
            .with_page("p1", page(vec![closed_issue(1, 1)], Some("p2")))
            .with_page("p2", page(vec![closed_issue(2, 2)], Some("p1")));

        let collection = collect(&fetcher, "p1", Mode::Closed, &window()).await;

        assert_eq!(collection.pages_fetched, 2);
        assert_eq!(collection.facts.len(), 2);
        assert_eq!(collection.failure.unwrap().cause, FailureCause::RepeatedPage);
        assert_eq!(fetcher.requests(), vec!["p1", "p2"]);
    }
}
