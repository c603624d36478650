//! Folds issue facts into [`SummaryStats`].

use super::summary_stats::SummaryStats;
use super::{IssueFact, Mode};

/// Aggregate `facts` into summary statistics.
///
/// Every fact counts towards `total`, towards exactly one gain bucket and exactly one trouble
/// bucket. In [`Mode::Closed`] the time-to-close figures are computed as well.
#[must_use]
pub fn aggregate(facts: &[IssueFact], mode: Mode) -> SummaryStats {
    let mut stats = SummaryStats::empty(mode);
    let mut ttc_days = Vec::new();

    for fact in facts {
        stats.total += 1;

        if mode == Mode::Closed
            && let Some(days) = fact.time_to_close_days
        {
            ttc_days.push(days);
        }

        if let Some(resolution) = &fact.resolution {
            *stats.resolution_counts.entry(resolution.clone()).or_default() += 1;
            stats.closed_count += 1;
        }

        stats.gain_counts.record(fact.gain());
        stats.trouble_counts.record(fact.trouble());

        if fact.has_ops_tag {
            stats.ops_count += 1;
        }

        if fact.has_dev_tag {
            stats.dev_count += 1;
        }
    }

    if let Some(ttc) = compute_ttc_stats(ttc_days) {
        stats.max_ttc = ttc.max;
        stats.min_ttc = ttc.min;
        stats.avg_ttc = ttc.avg;
        stats.median_ttc = ttc.median;
    }

    stats
}

struct TtcStats {
    max: i64,
    min: i64,
    avg: f64,
    median: f64,
}

#[expect(clippy::cast_precision_loss, reason = "day counts are far below f64 precision limits")]
fn compute_ttc_stats(mut days: Vec<i64>) -> Option<TtcStats> {
    if days.is_empty() {
        return None;
    }

    days.sort_unstable();

    let len = days.len();
    let mid = len / 2;
    let median = if len % 2 == 0 {
        (days[mid - 1] as f64 + days[mid] as f64) / 2.0
    } else {
        days[mid] as f64
    };

    Some(TtcStats {
        max: days[len - 1],
        min: days[0],
        avg: days.iter().map(|&d| d as f64).sum::<f64>() / len as f64,
        median,
    })
}
