//! The controlled tag vocabularies used to classify issues.
//!
//! Two families share the same three levels: *gain* tags (`low-gain`, `medium-gain`,
//! `high-gain`) and *trouble* tags (`low-trouble`, `medium-trouble`, `high-trouble`).
//! The literal `ops` and `dev` tags are tracked separately as plain flags.

use strum::{Display, EnumIter, IntoEnumIterator};

/// Tag marking an issue as operations work.
pub const OPS_TAG: &str = "ops";

/// Tag marking an issue as development work.
pub const DEV_TAG: &str = "dev";

/// Label of the bucket counting issues that carry no tag of a family.
pub const NO_TAG: &str = "no_tag";

/// Level of a gain or trouble tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display)]
pub enum Level {
    #[strum(serialize = "low")]
    Low,
    #[strum(serialize = "medium")]
    Medium,
    #[strum(serialize = "high")]
    High,
}

/// A family of leveled tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum TagFamily {
    #[strum(serialize = "gain")]
    Gain,
    #[strum(serialize = "trouble")]
    Trouble,
}

impl TagFamily {
    /// The tag text for `level` in this family, e.g. `medium-trouble`.
    #[must_use]
    pub const fn tag(self, level: Level) -> &'static str {
        match (self, level) {
            (Self::Gain, Level::Low) => "low-gain",
            (Self::Gain, Level::Medium) => "medium-gain",
            (Self::Gain, Level::High) => "high-gain",
            (Self::Trouble, Level::Low) => "low-trouble",
            (Self::Trouble, Level::Medium) => "medium-trouble",
            (Self::Trouble, Level::High) => "high-trouble",
        }
    }

    /// Look up a tag in this family's vocabulary.
    #[must_use]
    pub fn level_of(self, tag: &str) -> Option<Level> {
        Level::iter().find(|&level| self.tag(level) == tag)
    }
}

/// Classification of an issue's tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSummary {
    /// Gain tags in the order they appear on the issue.
    pub gain: Vec<Level>,
    /// Trouble tags in the order they appear on the issue.
    pub trouble: Vec<Level>,
    pub ops: bool,
    pub dev: bool,
}

impl TagSummary {
    /// Scan a tag list once and classify every entry.
    pub fn scan<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        let mut summary = Self::default();

        for tag in tags {
            if let Some(level) = TagFamily::Gain.level_of(tag) {
                summary.gain.push(level);
            } else if let Some(level) = TagFamily::Trouble.level_of(tag) {
                summary.trouble.push(level);
            } else if tag == OPS_TAG {
                summary.ops = true;
            } else if tag == DEV_TAG {
                summary.dev = true;
            }
        }

        summary
    }
}
