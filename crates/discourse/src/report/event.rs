//! Event window analysis.

use chrono::NaiveDate;
use serde::Serialize;

use super::summary::{CorpusSummary, FrameTotal};
use crate::analysis::{Bucket, Lexicon, ScoredTweet};

/// Summary of tweets posted inside a named date window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventReport {
    /// Event label.
    pub name: String,
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
    /// Tweets posted in the window.
    pub tweets: usize,
    /// Mean security intensity, zero for an empty window.
    pub mean_intensity: f64,
    /// Mean engagement over tweets that report it, if any do.
    pub mean_engagement: Option<f64>,
    /// Enemy frames that matched at least once, in lexicon order.
    pub enemy_frames: Vec<FrameTotal>,
    /// Economic frames that matched at least once, in lexicon order.
    pub economic_frames: Vec<FrameTotal>,
}

impl EventReport {
    /// Analyze tweets dated within `[start, end]`, both days included.
    ///
    /// Undated tweets never fall inside a window.
    #[must_use]
    pub fn build(
        scored: &[ScoredTweet],
        lexicon: &Lexicon,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        let window: Vec<ScoredTweet> = scored
            .iter()
            .filter(|s| s.tweet().date().is_some_and(|d| d >= start && d <= end))
            .cloned()
            .collect();

        let corpus = CorpusSummary::build(&window, lexicon);
        let engagements: Vec<u64> = window
            .iter()
            .filter_map(|s| s.tweet().engagement.total())
            .collect();
        let mean_engagement = if engagements.is_empty() {
            None
        } else {
            Some(engagements.iter().map(|e| *e as f64).sum::<f64>() / engagements.len() as f64)
        };

        let matched = |bucket: Bucket| {
            corpus
                .frames
                .iter()
                .filter(|f| f.bucket == bucket && f.total > 0)
                .cloned()
                .collect::<Vec<_>>()
        };

        let report = Self {
            name: name.into(),
            start,
            end,
            tweets: corpus.tweets,
            mean_intensity: corpus.mean_intensity,
            mean_engagement,
            enemy_frames: matched(Bucket::Enemy),
            economic_frames: matched(Bucket::Economic),
        };
        tracing::info!(
            event = %report.name,
            start = %start,
            end = %end,
            tweets = report.tweets,
            "Analyzed event window"
        );
        report
    }
}
