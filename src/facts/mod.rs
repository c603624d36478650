//! Issue collection and aggregation.
//!
//! Pages of a project's issue collection are fetched one after another through a
//! [`PageFetcher`], each raw issue is turned into an [`IssueFact`] (or skipped), and the
//! facts of one [`Mode`] are folded into [`SummaryStats`].

mod aggregator;
mod client;
mod collector;
mod extractor;
mod issue_fact;
mod mode;
mod page;
mod raw_issue;
mod stats_outcome;
mod summary_stats;
mod tags;
mod time_window;

pub use aggregator::aggregate;
pub use client::{Client, issues_url, parse_base_url, repository_issues_page};
pub use collector::{Collection, collect};
pub use extractor::{Extracted, SkipReason, extract};
pub use issue_fact::IssueFact;
pub use mode::Mode;
pub use page::{FailureCause, FetchFailure, Page, PageFetcher};
pub use stats_outcome::{StatsOutcome, aggregate_closed, aggregate_mode, aggregate_open};
pub use summary_stats::{LevelCounts, SummaryStats};
pub use tags::{DEV_TAG, Level, NO_TAG, OPS_TAG, TagFamily, TagSummary};
pub use time_window::{DATE_FORMAT, TimeWindow};
