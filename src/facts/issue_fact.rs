use super::tags::Level;
use chrono::{DateTime, Utc};

/// Normalized view of one tracker ticket, ready for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFact {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,

    /// Whole days from creation to closure; only computed for closed-mode facts.
    pub time_to_close_days: Option<i64>,

    /// Close status of the ticket, `None` while it is unresolved.
    pub resolution: Option<String>,

    pub gain_tags: Vec<Level>,
    pub trouble_tags: Vec<Level>,
    pub has_ops_tag: bool,
    pub has_dev_tag: bool,
}

impl IssueFact {
    /// The gain tag that counts for this issue: the first one found.
    #[must_use]
    pub fn gain(&self) -> Option<Level> {
        self.gain_tags.first().copied()
    }

    /// The trouble tag that counts for this issue: the first one found.
    #[must_use]
    pub fn trouble(&self) -> Option<Level> {
        self.trouble_tags.first().copied()
    }
}
