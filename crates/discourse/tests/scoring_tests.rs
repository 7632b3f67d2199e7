//! Scoring invariants checked through the public API.

use chrono::{TimeZone, Utc};
use discourse::report::summarize;
use discourse::{Bucket, Categorizer, Frame, Lexicon, Period, ScoredTweet, Tweet};

// =============================================================================
// Helpers
// =============================================================================

fn categorizer(frames: Vec<Frame>) -> Categorizer {
    Categorizer::new(Lexicon::new(frames).expect("valid lexicon")).expect("compiled patterns")
}

fn small() -> Categorizer {
    categorizer(vec![
        Frame::new("casta", Bucket::Enemy, ["casta"]),
        Frame::new("crisis", Bucket::Economic, ["crisis"]),
    ])
}

fn text(body: &str) -> Tweet {
    Tweet::new("1", None, Some(body.to_string()))
}

fn dated(id: &str, year: i32, body: &str) -> Tweet {
    let posted = Utc
        .with_ymd_and_hms(year, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Tweet::new(id, Some(posted), Some(body.to_string()))
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn test_casta_and_crisis() {
    let scored = ScoredTweet::score(text("la casta y la crisis"), &small());
    let totals = scored.totals();

    assert_eq!(totals.enemy, 1);
    assert_eq!(totals.economic, 1);
    assert_eq!(totals.war, 0);
    assert_eq!(scored.security_intensity(), 2);
}

#[test]
fn test_empty_and_missing_text_score_zero() {
    let categorizer = small();
    for tweet in [text(""), Tweet::new("2", None, None)] {
        let scored = ScoredTweet::score(tweet, &categorizer);
        assert_eq!(scored.counts().total(), 0);
        assert_eq!(scored.security_intensity(), 0);
        assert!(!scored.has_security_frame());
    }
}

#[test]
fn test_yearly_grouping() {
    let categorizer = small();
    let corpus: Vec<ScoredTweet> = [
        dated("a", 2023, "casta crisis"),
        dated("b", 2023, "casta casta crisis crisis"),
        dated("c", 2024, "casta"),
    ]
    .into_iter()
    .map(|t| ScoredTweet::score(t, &categorizer))
    .collect();

    let grouped = summarize(&corpus, Period::Year);
    assert_eq!(grouped.groups.len(), 2);

    let y2023 = grouped.group("2023").expect("2023 group");
    assert_eq!(y2023.tweets, 2);
    assert_eq!(y2023.intensity_sum, 6);
    assert!((y2023.intensity_mean - 3.0).abs() < f64::EPSILON);

    let y2024 = grouped.group("2024").expect("2024 group");
    assert_eq!(y2024.tweets, 1);
    assert_eq!(y2024.intensity_sum, 1);
    assert!((y2024.intensity_mean - 1.0).abs() < f64::EPSILON);
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_score_is_sum_of_scored_buckets() {
    let categorizer = categorizer(vec![
        Frame::new("casta", Bucket::Enemy, ["casta"]),
        Frame::new("crisis", Bucket::Economic, ["crisis"]),
        Frame::new("war", Bucket::War, ["guerra"]),
        Frame::new("freedom", Bucket::Liberty, ["libertad"]),
    ]);
    let scored = ScoredTweet::score(
        text("guerra a la casta, crisis y guerra, viva la libertad"),
        &categorizer,
    );
    let totals = scored.totals();

    assert_eq!(totals.liberty, 1);
    assert_eq!(
        scored.security_intensity(),
        totals.enemy + totals.economic + totals.war
    );
    assert_eq!(scored.security_intensity(), 4);
}

#[test]
fn test_bucket_is_sum_of_its_frames() {
    let categorizer = categorizer(vec![
        Frame::new("casta", Bucket::Enemy, ["casta", "políticos"]),
        Frame::new("media", Bucket::Enemy, ["periodistas"]),
        Frame::new("crisis", Bucket::Economic, ["crisis"]),
    ]);
    let scored = ScoredTweet::score(
        text("Los políticos de la casta y los periodistas"),
        &categorizer,
    );

    assert_eq!(scored.counts().get("casta"), 2);
    assert_eq!(scored.counts().get("media"), 1);
    assert_eq!(scored.totals().enemy, 3);
    assert_eq!(scored.totals().economic, 0);
}

#[test]
fn test_scoring_is_idempotent() {
    let categorizer = small();
    let first = ScoredTweet::score(text("CASTA, crisis, casta"), &categorizer);
    let second = ScoredTweet::score(text("CASTA, crisis, casta"), &categorizer);
    assert_eq!(first, second);
}

#[test]
fn test_case_does_not_change_counts() {
    let categorizer = small();
    let lower = ScoredTweet::score(text("la casta y la crisis"), &categorizer);
    let upper = ScoredTweet::score(text("LA CASTA Y LA CRISIS"), &categorizer);
    assert_eq!(lower.counts(), upper.counts());
}

#[test]
fn test_substrings_of_longer_words_do_not_match() {
    let scored = ScoredTweet::score(text("castaño y subcrisis"), &small());
    assert_eq!(scored.security_intensity(), 0);
}

#[test]
fn test_duplicate_keyword_across_buckets_is_rejected() {
    let result = Lexicon::new(vec![
        Frame::new("casta", Bucket::Enemy, ["casta"]),
        Frame::new("other", Bucket::Economic, ["Casta"]),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_default_lexicon_scores_spanish_text() {
    let categorizer = Categorizer::new(Lexicon::spanish_default()).expect("compiled");
    let scored = ScoredTweet::score(
        text("La casta política y el kirchnerismo generan inflación. ¡Es una batalla!"),
        &categorizer,
    );

    assert_eq!(scored.counts().get("la_casta"), 1);
    assert_eq!(scored.counts().get("kirchnerismo"), 1);
    assert_eq!(scored.counts().get("fiscal_terrorism"), 1);
    assert_eq!(scored.counts().get("war_language"), 1);
    assert_eq!(scored.security_intensity(), 4);
}
