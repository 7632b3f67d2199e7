//! Tweet data types.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tweet as read from the input corpus. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    /// Unique tweet ID (row number when the input has no ID column).
    pub id: String,
    /// When the tweet was posted, if the timestamp was present and parseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    /// Tweet text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Engagement counters, when the corpus carries them.
    #[serde(default)]
    pub engagement: Engagement,
}

impl Tweet {
    /// Create a new tweet with minimal required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, posted_at: Option<DateTime<Utc>>, text: Option<String>) -> Self {
        Self {
            id: id.into(),
            posted_at,
            text,
            engagement: Engagement::default(),
        }
    }

    /// Attach engagement counters.
    #[must_use]
    pub fn with_engagement(mut self, engagement: Engagement) -> Self {
        self.engagement = engagement;
        self
    }

    /// Calendar date the tweet was posted.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.posted_at.map(|t| t.date_naive())
    }

    /// Calendar year the tweet was posted.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.posted_at.map(|t| t.year())
    }

    /// Month (1-12) the tweet was posted.
    #[must_use]
    pub fn month(&self) -> Option<u32> {
        self.posted_at.map(|t| t.month())
    }

    /// Quarter (1-4) the tweet was posted.
    #[must_use]
    pub fn quarter(&self) -> Option<u32> {
        self.month().map(|m| (m - 1) / 3 + 1)
    }
}

/// Likes, retweets and replies for a tweet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweets: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<u64>,
}

impl Engagement {
    /// Sum of the known counters; `None` when none of them is known.
    ///
    /// Saturates at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        [self.likes, self.retweets, self.replies]
            .into_iter()
            .flatten()
            .reduce(u64::saturating_add)
    }
}

/// Parse a tweet timestamp.
///
/// Accepts RFC 3339 (`2023-05-01T12:30:00Z`, `2023-05-01 12:30:00+00:00`),
/// naive date-times (`2023-05-01 12:30:00`, optionally with fractional
/// seconds or a `T` separator) interpreted as UTC, and bare dates
/// (`2023-05-01`) at midnight UTC. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
