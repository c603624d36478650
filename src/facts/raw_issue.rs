//! Wire shape of one entry of a page's `issues` array.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Minimal issue info with only the fields we need
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub id: u64,

    #[serde(default, deserialize_with = "deserialize_epoch")]
    pub date_created: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "deserialize_epoch")]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub close_status: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl RawIssue {
    /// Decode one issue object, reporting why it could not be decoded.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// The resolution label, with an empty label treated as no resolution.
    #[must_use]
    pub fn resolution(&self) -> Option<&str> {
        self.close_status.as_deref().filter(|s| !s.is_empty())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().flatten().map(String::as_str)
    }
}

/// Epoch seconds as sent by the tracker: usually a decimal string, sometimes a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Epoch {
    Seconds(i64),
    Text(String),
}

/// Decode an optional epoch timestamp.
///
/// `null`, `""` and `0` all mean the timestamp was never set.
fn deserialize_epoch<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = match Option::<Epoch>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Epoch::Seconds(secs)) => secs,
        Some(Epoch::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map_err(|e| serde::de::Error::custom(format!("invalid epoch timestamp '{text}': {e}")))?
        }
    };

    if secs == 0 {
        return Ok(None);
    }

    DateTime::from_timestamp(secs, 0)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("epoch timestamp {secs} is out of range")))
}
