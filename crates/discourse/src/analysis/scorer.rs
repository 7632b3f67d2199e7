//! Security intensity scoring.

use serde::Serialize;

use super::categories::Bucket;
use super::matcher::{Categorizer, FrameCounts};
use crate::twitter::Tweet;

/// Per-bucket sums of frame counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketTotals {
    pub enemy: u32,
    pub economic: u32,
    pub war: u32,
    pub liberty: u32,
}

impl BucketTotals {
    /// Roll frame counts up into their buckets.
    ///
    /// Frames unknown to the categorizer are ignored.
    #[must_use]
    pub fn from_counts(counts: &FrameCounts, categorizer: &Categorizer) -> Self {
        let mut totals = Self::default();
        for (frame, count) in counts.iter() {
            if let Some(bucket) = categorizer.bucket_of(frame) {
                *totals.slot(bucket) += count;
            }
        }
        totals
    }

    /// Total for a bucket.
    #[must_use]
    pub fn get(&self, bucket: Bucket) -> u32 {
        match bucket {
            Bucket::Enemy => self.enemy,
            Bucket::Economic => self.economic,
            Bucket::War => self.war,
            Bucket::Liberty => self.liberty,
        }
    }

    /// Sum of the scored buckets (enemy + economic + war).
    #[must_use]
    pub fn intensity(&self) -> u32 {
        Bucket::scored().iter().map(|b| self.get(*b)).sum()
    }

    fn slot(&mut self, bucket: Bucket) -> &mut u32 {
        match bucket {
            Bucket::Enemy => &mut self.enemy,
            Bucket::Economic => &mut self.economic,
            Bucket::War => &mut self.war,
            Bucket::Liberty => &mut self.liberty,
        }
    }
}

/// A tweet with its frame counts, bucket totals and intensity score.
///
/// Built once by [`ScoredTweet::score`]; fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTweet {
    tweet: Tweet,
    counts: FrameCounts,
    totals: BucketTotals,
    security_intensity: u32,
}

impl ScoredTweet {
    /// Categorize and score a tweet.
    #[must_use]
    pub fn score(tweet: Tweet, categorizer: &Categorizer) -> Self {
        let counts = categorizer.categorize(tweet.text.as_deref());
        let totals = BucketTotals::from_counts(&counts, categorizer);
        Self {
            tweet,
            counts,
            totals,
            security_intensity: totals.intensity(),
        }
    }

    /// The source tweet.
    #[must_use]
    pub fn tweet(&self) -> &Tweet {
        &self.tweet
    }

    /// Per-frame keyword counts.
    #[must_use]
    pub fn counts(&self) -> &FrameCounts {
        &self.counts
    }

    /// Per-bucket totals.
    #[must_use]
    pub fn totals(&self) -> BucketTotals {
        self.totals
    }

    /// enemy_total + economic_total + war_total.
    #[must_use]
    pub fn security_intensity(&self) -> u32 {
        self.security_intensity
    }

    /// Whether any scored frame matched.
    #[must_use]
    pub fn has_security_frame(&self) -> bool {
        self.security_intensity > 0
    }
}

/// Score every tweet in order.
pub fn score_corpus<I>(tweets: I, categorizer: &Categorizer) -> Vec<ScoredTweet>
where
    I: IntoIterator<Item = Tweet>,
{
    let scored: Vec<ScoredTweet> = tweets
        .into_iter()
        .map(|t| ScoredTweet::score(t, categorizer))
        .collect();
    tracing::info!(
        tweets = scored.len(),
        with_frames = scored.iter().filter(|s| s.has_security_frame()).count(),
        "Scored corpus"
    );
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Frame, Lexicon};

    fn categorizer() -> Categorizer {
        let lexicon = Lexicon::new(vec![
            Frame::new("casta", Bucket::Enemy, ["casta"]),
            Frame::new("kirchnerismo", Bucket::Enemy, ["cfk"]),
            Frame::new("crisis", Bucket::Economic, ["crisis"]),
            Frame::new("war_language", Bucket::War, ["guerra"]),
            Frame::new("liberty", Bucket::Liberty, ["libertad"]),
        ])
        .expect("lexicon");
        Categorizer::new(lexicon).expect("categorizer")
    }

    fn scored(text: &str) -> ScoredTweet {
        ScoredTweet::score(Tweet::new("1", None, Some(text.to_string())), &categorizer())
    }

    #[test]
    fn test_bucket_totals_sum_frames() {
        let s = scored("la casta y cfk, la casta en guerra");
        assert_eq!(s.totals().enemy, 3);
        assert_eq!(s.totals().war, 1);
        assert_eq!(s.totals().economic, 0);
        assert_eq!(s.security_intensity(), 4);
    }

    #[test]
    fn test_liberty_excluded_from_intensity() {
        let s = scored("libertad libertad crisis");
        assert_eq!(s.totals().liberty, 2);
        assert_eq!(s.security_intensity(), 1);
    }

    #[test]
    fn test_missing_text_scores_zero() {
        let s = ScoredTweet::score(Tweet::new("1", None, None), &categorizer());
        assert_eq!(s.totals(), BucketTotals::default());
        assert_eq!(s.security_intensity(), 0);
        assert!(!s.has_security_frame());
    }

    #[test]
    fn test_score_corpus_preserves_order() {
        let tweets = vec![
            Tweet::new("a", None, Some("crisis".to_string())),
            Tweet::new("b", None, None),
        ];
        let scored = score_corpus(tweets, &categorizer());
        let ids: Vec<_> = scored.iter().map(|s| s.tweet().id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
