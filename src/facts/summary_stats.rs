use super::Mode;
use super::tags::{Level, NO_TAG, TagFamily};
use std::collections::BTreeMap;

/// Per-level counts of one tag family, including the `no_tag` bucket.
///
/// Every bucket exists from the start, so a report always lists every category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub no_tag: u64,
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl LevelCounts {
    /// Count one issue; `None` lands in the `no_tag` bucket.
    pub const fn record(&mut self, level: Option<Level>) {
        match level {
            None => self.no_tag += 1,
            Some(Level::Low) => self.low += 1,
            Some(Level::Medium) => self.medium += 1,
            Some(Level::High) => self.high += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.no_tag + self.low + self.medium + self.high
    }

    /// The buckets keyed by their tag text in `family`, `no_tag` first.
    #[must_use]
    pub const fn entries(&self, family: TagFamily) -> [(&'static str, u64); 4] {
        [
            (NO_TAG, self.no_tag),
            (family.tag(Level::Low), self.low),
            (family.tag(Level::Medium), self.medium),
            (family.tag(Level::High), self.high),
        ]
    }
}

/// Aggregated statistics over the issues of one collection.
///
/// The time-to-close figures are only meaningful in [`Mode::Closed`]; they are zero otherwise,
/// and when no issue was aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub mode: Mode,

    /// Number of issues aggregated.
    pub total: u64,

    /// Number of issues with a resolution.
    pub closed_count: u64,

    pub max_ttc: i64,
    pub min_ttc: i64,
    pub avg_ttc: f64,
    pub median_ttc: f64,

    /// Issue count per observed resolution label.
    pub resolution_counts: BTreeMap<String, u64>,

    pub gain_counts: LevelCounts,
    pub trouble_counts: LevelCounts,
    pub ops_count: u64,
    pub dev_count: u64,
}

impl SummaryStats {
    /// Statistics over no issues at all.
    #[must_use]
    pub const fn empty(mode: Mode) -> Self {
        Self {
            mode,
            total: 0,
            closed_count: 0,
            max_ttc: 0,
            min_ttc: 0,
            avg_ttc: 0.0,
            median_ttc: 0.0,
            resolution_counts: BTreeMap::new(),
            gain_counts: LevelCounts {
                no_tag: 0,
                low: 0,
                medium: 0,
                high: 0,
            },
            trouble_counts: LevelCounts {
                no_tag: 0,
                low: 0,
                medium: 0,
                high: 0,
            },
            ops_count: 0,
            dev_count: 0,
        }
    }

    /// Counts of `family`, i.e. `gain_counts` or `trouble_counts`.
    #[must_use]
    pub const fn level_counts(&self, family: TagFamily) -> &LevelCounts {
        match family {
            TagFamily::Gain => &self.gain_counts,
            TagFamily::Trouble => &self.trouble_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_counts_record() {
        let mut counts = LevelCounts::default();
        counts.record(None);
        counts.record(Some(Level::High));
        counts.record(Some(Level::High));

        assert_eq!(counts.no_tag, 1);
        assert_eq!(counts.low, 0);
        assert_eq!(counts.high, 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_level_counts_entries() {
        let counts = LevelCounts {
            no_tag: 4,
            low: 1,
            medium: 2,
            high: 3,
        };

        assert_eq!(
            counts.entries(TagFamily::Trouble),
            [("no_tag", 4), ("low-trouble", 1), ("medium-trouble", 2), ("high-trouble", 3)]
        );
        assert_eq!(counts.entries(TagFamily::Gain)[1], ("low-gain", 1));
    }

    #[test]
    fn test_empty_stats() {
        let stats = SummaryStats::empty(Mode::Closed);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.max_ttc, 0);
        assert!(stats.median_ttc.abs() < f64::EPSILON);
        assert_eq!(stats.level_counts(TagFamily::Gain).total(), 0);
        assert!(stats.resolution_counts.is_empty());
    }
}
