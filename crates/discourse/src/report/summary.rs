//! Descriptive aggregation of scored tweets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::analysis::{Bucket, Lexicon, ScoredTweet};
use crate::error::DiscourseError;

/// Time unit used to group tweets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Calendar year.
    #[default]
    Year,
    /// Calendar quarter within a year.
    Quarter,
    /// Calendar month within a year.
    Month,
}

impl Period {
    /// Grouping key for a tweet, `None` when it has no timestamp.
    #[must_use]
    pub fn key_for(self, scored: &ScoredTweet) -> Option<PeriodKey> {
        let tweet = scored.tweet();
        let year = tweet.year()?;
        let sub = match self {
            Period::Year => 0,
            Period::Quarter => tweet.quarter()?,
            Period::Month => tweet.month()?,
        };
        Some(PeriodKey {
            period: self,
            year,
            sub,
        })
    }
}

impl FromStr for Period {
    type Err = DiscourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "yearly" | "y" => Ok(Period::Year),
            "quarter" | "quarterly" | "q" => Ok(Period::Quarter),
            "month" | "monthly" | "m" => Ok(Period::Month),
            other => Err(DiscourseError::InvalidPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Year => "year",
            Period::Quarter => "quarter",
            Period::Month => "month",
        };
        write!(f, "{s}")
    }
}

/// Sortable group key: `2023`, `2023-Q2` or `2023-04`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodKey {
    period: Period,
    year: i32,
    sub: u32,
}

impl PeriodKey {
    /// Calendar year of the group.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period {
            Period::Year => write!(f, "{}", self.year),
            Period::Quarter => write!(f, "{}-Q{}", self.year, self.sub),
            Period::Month => write!(f, "{}-{:02}", self.year, self.sub),
        }
    }
}

/// Aggregates for one time group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Display label of the group (`2023`, `2023-Q2`, `2023-04`).
    pub label: String,
    /// Number of tweets in the group.
    pub tweets: usize,
    /// Sum of security intensity.
    pub intensity_sum: u64,
    /// Mean security intensity.
    pub intensity_mean: f64,
    /// Mean enemy total per tweet.
    pub enemy_mean: f64,
    /// Mean economic total per tweet.
    pub economic_mean: f64,
    /// Mean war total per tweet.
    pub war_mean: f64,
    /// Mean liberty total per tweet.
    pub liberty_mean: f64,
    /// Sum of engagement over tweets that report it, saturating at `u64::MAX`.
    pub engagement_sum: u64,
}

impl GroupSummary {
    /// Mean total for a bucket.
    #[must_use]
    pub fn bucket_mean(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Enemy => self.enemy_mean,
            Bucket::Economic => self.economic_mean,
            Bucket::War => self.war_mean,
            Bucket::Liberty => self.liberty_mean,
        }
    }
}

#[derive(Default)]
struct Accumulator {
    tweets: usize,
    intensity: u64,
    buckets: [u64; 4],
    engagement: u64,
}

impl Accumulator {
    fn add(&mut self, scored: &ScoredTweet) {
        self.tweets += 1;
        self.intensity += u64::from(scored.security_intensity());
        let totals = scored.totals();
        for (slot, bucket) in self.buckets.iter_mut().zip(Bucket::all()) {
            *slot += u64::from(totals.get(*bucket));
        }
        self.engagement = self
            .engagement
            .saturating_add(scored.tweet().engagement.total().unwrap_or(0));
    }

    fn finish(self, label: String) -> GroupSummary {
        let n = self.tweets as f64;
        let mean = |sum: u64| sum as f64 / n;
        GroupSummary {
            label,
            tweets: self.tweets,
            intensity_sum: self.intensity,
            intensity_mean: mean(self.intensity),
            enemy_mean: mean(self.buckets[0]),
            economic_mean: mean(self.buckets[1]),
            war_mean: mean(self.buckets[2]),
            liberty_mean: mean(self.buckets[3]),
            engagement_sum: self.engagement,
        }
    }
}

/// Time-grouped summary of a corpus.
///
/// Only groups with at least one tweet are present, in chronological
/// order. Tweets without a timestamp are left out and counted in
/// `excluded`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedSummary {
    /// Time unit used for grouping.
    pub period: Period,
    /// One entry per group present in the data.
    pub groups: Vec<GroupSummary>,
    /// Tweets left out because they have no timestamp.
    pub excluded: usize,
}

impl GroupedSummary {
    /// Look up a group by its label.
    #[must_use]
    pub fn group(&self, label: &str) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.label == label)
    }
}

/// Group scored tweets by period.
pub fn summarize(scored: &[ScoredTweet], period: Period) -> GroupedSummary {
    let mut groups: BTreeMap<PeriodKey, Accumulator> = BTreeMap::new();
    let mut excluded = 0;

    for s in scored {
        match period.key_for(s) {
            Some(key) => groups.entry(key).or_default().add(s),
            None => excluded += 1,
        }
    }

    if excluded > 0 {
        tracing::warn!(excluded, %period, "Tweets without timestamp left out of grouped summary");
    }

    GroupedSummary {
        period,
        groups: groups
            .into_iter()
            .map(|(key, acc)| acc.finish(key.to_string()))
            .collect(),
        excluded,
    }
}

/// Corpus-wide total for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameTotal {
    pub frame: String,
    pub bucket: Bucket,
    pub total: u64,
}

/// Corpus-wide total for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketTotal {
    pub bucket: Bucket,
    pub total: u64,
}

/// Whole-corpus descriptive summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSummary {
    /// Tweets analyzed.
    pub tweets: usize,
    /// Tweets without a usable timestamp.
    pub undated: usize,
    /// Earliest timestamp in the corpus.
    pub first_posted: Option<DateTime<Utc>>,
    /// Latest timestamp in the corpus.
    pub last_posted: Option<DateTime<Utc>>,
    /// Tweets with security intensity above zero.
    pub with_security_frames: usize,
    /// Share of tweets with security intensity above zero (0.0-1.0).
    pub security_share: f64,
    /// Mean security intensity.
    pub mean_intensity: f64,
    /// Sum of security intensity.
    pub total_intensity: u64,
    /// Totals per frame, in lexicon order.
    pub frames: Vec<FrameTotal>,
    /// Totals per bucket.
    pub buckets: Vec<BucketTotal>,
}

impl CorpusSummary {
    /// Summarize a scored corpus against the lexicon that scored it.
    #[must_use]
    pub fn build(scored: &[ScoredTweet], lexicon: &Lexicon) -> Self {
        let tweets = scored.len();
        let total_intensity: u64 = scored
            .iter()
            .map(|s| u64::from(s.security_intensity()))
            .sum();
        let with_security_frames = scored.iter().filter(|s| s.has_security_frame()).count();
        let ratio = |num: f64| if tweets == 0 { 0.0 } else { num / tweets as f64 };

        let frames = lexicon
            .frames()
            .iter()
            .map(|f| FrameTotal {
                frame: f.name.clone(),
                bucket: f.bucket,
                total: scored.iter().map(|s| u64::from(s.counts().get(&f.name))).sum(),
            })
            .collect();

        let buckets = Bucket::all()
            .iter()
            .map(|b| BucketTotal {
                bucket: *b,
                total: scored.iter().map(|s| u64::from(s.totals().get(*b))).sum(),
            })
            .collect();

        let dates = scored.iter().filter_map(|s| s.tweet().posted_at);

        Self {
            tweets,
            undated: scored.iter().filter(|s| s.tweet().posted_at.is_none()).count(),
            first_posted: dates.clone().min(),
            last_posted: dates.max(),
            with_security_frames,
            security_share: ratio(with_security_frames as f64),
            mean_intensity: ratio(total_intensity as f64),
            total_intensity,
            frames,
            buckets,
        }
    }

    /// Corpus total for a frame, zero when the frame is unknown.
    #[must_use]
    pub fn frame_total(&self, frame: &str) -> u64 {
        self.frames
            .iter()
            .find(|f| f.frame == frame)
            .map_or(0, |f| f.total)
    }

    /// Corpus total for a bucket.
    #[must_use]
    pub fn bucket_total(&self, bucket: Bucket) -> u64 {
        self.buckets
            .iter()
            .find(|b| b.bucket == bucket)
            .map_or(0, |b| b.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Categorizer, Frame};
    use crate::twitter::{parse_timestamp, Engagement, Tweet};

    fn categorizer() -> Categorizer {
        let lexicon = Lexicon::new(vec![
            Frame::new("casta", Bucket::Enemy, ["casta"]),
            Frame::new("crisis", Bucket::Economic, ["crisis"]),
        ])
        .expect("lexicon");
        Categorizer::new(lexicon).expect("categorizer")
    }

    fn tweet(date: Option<&str>, text: &str) -> ScoredTweet {
        let tweet = Tweet::new("t", date.and_then(parse_timestamp), Some(text.to_string()));
        ScoredTweet::score(tweet, &categorizer())
    }

    #[test]
    fn test_groups_by_year() {
        let scored = vec![
            tweet(Some("2023-02-01"), "casta crisis"),
            tweet(Some("2023-11-30"), "casta casta crisis crisis"),
            tweet(Some("2024-01-01"), "crisis"),
        ];
        let summary = summarize(&scored, Period::Year);
        assert_eq!(summary.groups.len(), 2);
        assert_eq!(summary.excluded, 0);

        let y2023 = summary.group("2023").expect("2023");
        assert_eq!(y2023.tweets, 2);
        assert_eq!(y2023.intensity_sum, 6);
        assert!((y2023.intensity_mean - 3.0).abs() < f64::EPSILON);
        assert!((y2023.enemy_mean - 1.5).abs() < f64::EPSILON);

        let y2024 = summary.group("2024").expect("2024");
        assert_eq!(y2024.tweets, 1);
        assert_eq!(y2024.intensity_sum, 1);
        assert!((y2024.intensity_mean - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quarter_and_month_labels_are_chronological() {
        let scored = vec![
            tweet(Some("2024-01-15"), "casta"),
            tweet(Some("2023-12-15"), "casta"),
            tweet(Some("2023-04-01"), "casta"),
        ];
        let quarters: Vec<_> = summarize(&scored, Period::Quarter)
            .groups
            .into_iter()
            .map(|g| g.label)
            .collect();
        assert_eq!(quarters, vec!["2023-Q2", "2023-Q4", "2024-Q1"]);

        let months: Vec<_> = summarize(&scored, Period::Month)
            .groups
            .into_iter()
            .map(|g| g.label)
            .collect();
        assert_eq!(months, vec!["2023-04", "2023-12", "2024-01"]);
    }

    #[test]
    fn test_undated_tweets_are_excluded_and_counted() {
        let scored = vec![tweet(None, "casta"), tweet(Some("2023-01-01"), "casta")];
        let summary = summarize(&scored, Period::Year);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].tweets, 1);
    }

    #[test]
    fn test_empty_corpus_has_no_groups() {
        let summary = summarize(&[], Period::Month);
        assert!(summary.groups.is_empty());
        assert_eq!(summary.excluded, 0);
    }

    #[test]
    fn test_engagement_sum() {
        let engaged = Tweet::new("e", parse_timestamp("2023-01-01"), None).with_engagement(
            Engagement {
                likes: Some(5),
                retweets: Some(1),
                replies: None,
            },
        );
        let scored = vec![ScoredTweet::score(engaged, &categorizer())];
        let summary = summarize(&scored, Period::Year);
        assert_eq!(summary.groups[0].engagement_sum, 6);
    }

    #[test]
    fn test_engagement_sum_saturates() {
        let huge = Engagement {
            likes: Some(u64::MAX),
            retweets: None,
            replies: None,
        };
        let scored: Vec<ScoredTweet> = ["2023-01-01", "2023-06-01"]
            .iter()
            .map(|d| {
                let tweet = Tweet::new("e", parse_timestamp(d), None).with_engagement(huge);
                ScoredTweet::score(tweet, &categorizer())
            })
            .collect();
        let summary = summarize(&scored, Period::Year);
        assert_eq!(summary.groups[0].engagement_sum, u64::MAX);
    }

    #[test]
    fn test_corpus_summary() {
        let scored = vec![
            tweet(Some("2023-02-01"), "casta crisis"),
            tweet(None, "nada"),
            tweet(Some("2022-06-01"), "crisis"),
        ];
        let summary = CorpusSummary::build(&scored, categorizer().lexicon());
        assert_eq!(summary.tweets, 3);
        assert_eq!(summary.undated, 1);
        assert_eq!(summary.with_security_frames, 2);
        assert_eq!(summary.total_intensity, 3);
        assert!((summary.mean_intensity - 1.0).abs() < f64::EPSILON);
        assert_eq!(summary.frame_total("crisis"), 2);
        assert_eq!(summary.bucket_total(Bucket::Enemy), 1);
        assert_eq!(summary.first_posted, parse_timestamp("2022-06-01"));
        assert_eq!(summary.last_posted, parse_timestamp("2023-02-01"));
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("Quarter".parse::<Period>().ok(), Some(Period::Quarter));
        assert!("decade".parse::<Period>().is_err());
    }
}
