use super::aggregator::aggregate;
use super::collector::collect;
use super::page::{FetchFailure, PageFetcher};
use super::summary_stats::SummaryStats;
use super::{Mode, TimeWindow};

/// Statistics for one mode, plus how complete the underlying collection was.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsOutcome {
    pub stats: SummaryStats,
    pub pages_fetched: u32,
    pub skipped: u64,

    /// Set when a page could not be fetched; `stats` then covers only the earlier pages.
    pub failure: Option<FetchFailure>,
}

impl StatsOutcome {
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.stats.mode
    }

    /// Whether every page of the collection was fetched.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Statistics over the issues closed within `window`, starting at `start_url`.
pub async fn aggregate_closed<F: PageFetcher>(fetcher: &F, start_url: &str, window: &TimeWindow) -> StatsOutcome {
    aggregate_mode(fetcher, start_url, Mode::Closed, window).await
}

/// Statistics over the issues created within `window`, starting at `start_url`.
pub async fn aggregate_open<F: PageFetcher>(fetcher: &F, start_url: &str, window: &TimeWindow) -> StatsOutcome {
    aggregate_mode(fetcher, start_url, Mode::Open, window).await
}

/// Collect every page for `mode` and aggregate the resulting facts.
pub async fn aggregate_mode<F: PageFetcher>(fetcher: &F, start_url: &str, mode: Mode, window: &TimeWindow) -> StatsOutcome {
    let collection = collect(fetcher, start_url, mode, window).await;

    StatsOutcome {
        stats: aggregate(&collection.facts, mode),
        pages_fetched: collection.pages_fetched,
        skipped: collection.skipped,
        failure: collection.failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::page::{FailureCause, Page};
    use chrono::DateTime;
    use serde_json::json;

    const DAY: i64 = 86_400;
    const SINCE: i64 = 1_600_000_000;

    struct TwoPages;

    impl PageFetcher for TwoPages {
        async fn fetch(&self, url: &str) -> Page {
            match url {
                "first" => Page {
                    issues: vec![
                        json!({"id": 1, "date_created": SINCE, "closed_at": SINCE + 3 * DAY, "close_status": "Fixed", "tags": ["low-gain", "ops"]}),
                        json!({"id": 2, "date_created": SINCE + DAY, "closed_at": null, "close_status": "", "tags": ["dev"]}),
                    ],
                    next_page_url: Some("second".to_string()),
                    failure: None,
                },
                "second" => Page {
                    issues: vec![json!({"id": 3, "date_created": SINCE, "closed_at": SINCE + 7 * DAY, "close_status": "Invalid", "tags": []})],
                    next_page_url: None,
                    failure: None,
                },
                _ => Page::failed(url, FailureCause::Status(404)),
            }
        }
    }

    fn window() -> TimeWindow {
        TimeWindow::new(
            DateTime::from_timestamp(SINCE, 0).unwrap(),
            DateTime::from_timestamp(SINCE + 30 * DAY, 0).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_aggregate_closed() {
        let outcome = aggregate_closed(&TwoPages, "first", &window()).await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.mode(), Mode::Closed);
        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.stats.total, 2);
        assert_eq!(outcome.stats.closed_count, 2);
        assert_eq!(outcome.stats.min_ttc, 3);
        assert_eq!(outcome.stats.max_ttc, 7);
        assert_eq!(outcome.stats.gain_counts.low, 1);
        assert_eq!(outcome.stats.ops_count, 1);
    }

    #[tokio::test]
    async fn test_aggregate_open() {
        let outcome = aggregate_open(&TwoPages, "first", &window()).await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.mode(), Mode::Open);
        assert_eq!(outcome.stats.total, 3);
        assert_eq!(outcome.stats.closed_count, 2);
        assert_eq!(outcome.stats.dev_count, 1);
        assert_eq!(outcome.stats.max_ttc, 0);
    }

    #[tokio::test]
    async fn test_incomplete_outcome() {
        let outcome = aggregate_closed(&TwoPages, "missing", &window()).await;

        assert!(!outcome.is_complete());
        assert_eq!(outcome.stats, SummaryStats::empty(Mode::Closed));
        assert_eq!(outcome.failure.unwrap().cause, FailureCause::Status(404));
    }
}
