//! Maps raw issue objects into [`IssueFact`] records.

use super::raw_issue::RawIssue;
use super::tags::TagSummary;
use super::{IssueFact, Mode, TimeWindow};
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter};

const LOG_TARGET: &str = "  extractor";
const SECONDS_PER_DAY: i64 = 86_400;

/// Why a raw issue did not produce an [`IssueFact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The object does not have the expected shape.
    Malformed(String),

    /// No creation timestamp.
    MissingCreated,

    /// Closed mode only: no close timestamp.
    MissingClosed,

    /// The filtered timestamp is outside the time window.
    OutsideWindow,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed(e) => write!(f, "malformed record: {e}"),
            Self::MissingCreated => write!(f, "missing creation date"),
            Self::MissingClosed => write!(f, "missing close date"),
            Self::OutsideWindow => write!(f, "outside of the time window"),
        }
    }
}

/// Result of extracting one raw issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Fact(IssueFact),
    Skipped(SkipReason),
}

/// Turn one raw issue object into an [`IssueFact`], or explain why it is skipped.
///
/// In [`Mode::Closed`] the issue must be closed within `window`; in [`Mode::Open`] it must
/// have been created within `window`.
#[must_use]
pub fn extract(raw: &serde_json::Value, mode: Mode, window: &TimeWindow) -> Extracted {
    let issue = match RawIssue::from_json(raw) {
        Ok(issue) => issue,
        Err(e) => return Extracted::Skipped(SkipReason::Malformed(e.to_string())),
    };

    let Some(created_at) = issue.date_created else {
        return Extracted::Skipped(SkipReason::MissingCreated);
    };

    let (closed_at, time_to_close_days) = match mode {
        Mode::Closed => {
            let Some(closed_at) = issue.closed_at else {
                return Extracted::Skipped(SkipReason::MissingClosed);
            };

            if !window.contains(closed_at) {
                return Extracted::Skipped(SkipReason::OutsideWindow);
            }

            (Some(closed_at), Some(time_to_close_days(issue.id, created_at, closed_at)))
        }

        Mode::Open => {
            if !window.contains(created_at) {
                return Extracted::Skipped(SkipReason::OutsideWindow);
            }

            (issue.closed_at, None)
        }
    };

    let tags = TagSummary::scan(issue.tags());

    Extracted::Fact(IssueFact {
        id: issue.id,
        created_at,
        closed_at,
        time_to_close_days,
        resolution: issue.resolution().map(str::to_string),
        gain_tags: tags.gain,
        trouble_tags: tags.trouble,
        has_ops_tag: tags.ops,
        has_dev_tag: tags.dev,
    })
}

/// Whole days between creation and closure, rounded down.
fn time_to_close_days(id: u64, created_at: DateTime<Utc>, closed_at: DateTime<Utc>) -> i64 {
    let days = (closed_at - created_at).num_seconds().div_euclid(SECONDS_PER_DAY);
    if days < 0 {
        log::warn!(target: LOG_TARGET, "Issue #{id} was closed before it was created ({closed_at} < {created_at})");
    }
    days
}
