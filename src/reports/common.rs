//! Common utilities shared across report generators.

use crate::facts::{Mode, StatsOutcome, TagFamily};
use core::fmt::{Display, Formatter};
use std::collections::BTreeMap;
use strum::Display as StrumDisplay;

/// How a resolution label reads in the resolution outcome section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum ResolutionOutcome {
    #[strum(serialize = "positive")]
    Positive,
    #[strum(serialize = "negative")]
    Negative,
    #[strum(serialize = "other")]
    Other,
}

/// The resolution labels considered positive and negative.
///
/// Labels in neither list are reported as [`ResolutionOutcome::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionClasses {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl ResolutionClasses {
    #[must_use]
    pub const fn new(positive: Vec<String>, negative: Vec<String>) -> Self {
        Self { positive, negative }
    }

    #[must_use]
    pub fn classify(&self, resolution: &str) -> ResolutionOutcome {
        if self.positive.iter().any(|r| r == resolution) {
            ResolutionOutcome::Positive
        } else if self.negative.iter().any(|r| r == resolution) {
            ResolutionOutcome::Negative
        } else {
            ResolutionOutcome::Other
        }
    }

    /// Split observed resolution counts into the three outcome groups.
    #[must_use]
    pub fn split<'a>(&self, counts: &'a BTreeMap<String, u64>) -> ResolutionSplit<'a> {
        let mut split = ResolutionSplit::default();
        for (label, &count) in counts {
            let group = match self.classify(label) {
                ResolutionOutcome::Positive => &mut split.positive,
                ResolutionOutcome::Negative => &mut split.negative,
                ResolutionOutcome::Other => &mut split.other,
            };
            group.push((label.as_str(), count));
        }
        split
    }
}

/// Resolution counts grouped by outcome, each group sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSplit<'a> {
    pub positive: Vec<(&'a str, u64)>,
    pub negative: Vec<(&'a str, u64)>,
    pub other: Vec<(&'a str, u64)>,
}

impl ResolutionSplit<'_> {
    #[must_use]
    pub fn total(&self, outcome: ResolutionOutcome) -> u64 {
        let group = match outcome {
            ResolutionOutcome::Positive => &self.positive,
            ResolutionOutcome::Negative => &self.negative,
            ResolutionOutcome::Other => &self.other,
        };
        group.iter().map(|(_, count)| count).sum()
    }
}

/// A single reported figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    UInt(u64),
    Int(i64),
    Float(f64),
    Boolean(bool),
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UInt(u) => write!(f, "{u}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v:.2}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// A named figure, e.g. `closed.ttc.median`.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
}

impl Metric {
    fn new(name: String, value: MetricValue) -> Self {
        Self { name, value }
    }
}

/// Flatten one outcome into dotted metrics prefixed by its mode.
pub fn outcome_metrics(outcome: &StatsOutcome, classes: &ResolutionClasses) -> Vec<Metric> {
    let stats = &outcome.stats;
    let mode = stats.mode;
    let name = |suffix: &str| format!("{mode}.{suffix}");
    let mut metrics = vec![
        Metric::new(name("total"), MetricValue::UInt(stats.total)),
        Metric::new(name("closed"), MetricValue::UInt(stats.closed_count)),
    ];

    if mode == Mode::Closed {
        metrics.extend([
            Metric::new(name("ttc.max"), MetricValue::Int(stats.max_ttc)),
            Metric::new(name("ttc.min"), MetricValue::Int(stats.min_ttc)),
            Metric::new(name("ttc.avg"), MetricValue::Float(stats.avg_ttc)),
            Metric::new(name("ttc.median"), MetricValue::Float(stats.median_ttc)),
        ]);
    }

    for (label, &count) in &stats.resolution_counts {
        metrics.push(Metric::new(name(&format!("resolution.{label}")), MetricValue::UInt(count)));
    }

    let split = classes.split(&stats.resolution_counts);
    for outcome_kind in [ResolutionOutcome::Positive, ResolutionOutcome::Negative, ResolutionOutcome::Other] {
        metrics.push(Metric::new(
            name(&format!("resolution_outcome.{outcome_kind}")),
            MetricValue::UInt(split.total(outcome_kind)),
        ));
    }

    for family in [TagFamily::Gain, TagFamily::Trouble] {
        for (tag, count) in stats.level_counts(family).entries(family) {
            metrics.push(Metric::new(name(&format!("{family}.{tag}")), MetricValue::UInt(count)));
        }
    }

    metrics.extend([
        Metric::new(name("ops"), MetricValue::UInt(stats.ops_count)),
        Metric::new(name("dev"), MetricValue::UInt(stats.dev_count)),
        Metric::new(name("pages_fetched"), MetricValue::UInt(u64::from(outcome.pages_fetched))),
        Metric::new(name("skipped"), MetricValue::UInt(outcome.skipped)),
        Metric::new(name("complete"), MetricValue::Boolean(outcome.is_complete())),
    ]);

    metrics
}

/// Section title of a tag family, e.g. `Gain`.
pub const fn family_title(family: TagFamily) -> &'static str {
    match family {
        TagFamily::Gain => "Gain",
        TagFamily::Trouble => "Trouble",
    }
}

/// Format a day count computed as a mean or median.
pub fn format_days(days: f64) -> String {
    format!("{days:.2}")
}
