//! Securitization discourse analysis for tweet corpora.
//!
//! This crate provides:
//! - A validated keyword lexicon grouping frames into enemy, economic,
//!   war and liberty buckets (Spanish defaults built in)
//! - Whole-word, case-insensitive keyword counting per frame
//! - Per-tweet security intensity scores (enemy + economic + war)
//! - Time-grouped summaries, event windows and high-intensity exports
//! - CSV/JSON corpus loading and CSV, JSON and SVG artifacts
//!
//! ```
//! use discourse::{Bucket, Categorizer, Frame, Lexicon, ScoredTweet, Tweet};
//!
//! let lexicon = Lexicon::new(vec![
//!     Frame::new("casta", Bucket::Enemy, ["casta"]),
//!     Frame::new("crisis", Bucket::Economic, ["crisis"]),
//! ])?;
//! let categorizer = Categorizer::new(lexicon)?;
//!
//! let tweet = Tweet::new("1", None, Some("la casta y la crisis".to_string()));
//! let scored = ScoredTweet::score(tweet, &categorizer);
//! assert_eq!(scored.security_intensity(), 2);
//! # Ok::<(), discourse::DiscourseError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod twitter;

// Re-export main types
pub use analysis::{Bucket, BucketTotals, Categorizer, Frame, FrameCounts, Lexicon, ScoredTweet};
pub use config::{AnalysisConfig, ColumnConfig};
pub use error::DiscourseError;
pub use pipeline::{AnalysisRun, AnalysisSummary, OutputPlan};
pub use report::{CorpusSummary, EventReport, GroupSummary, GroupedSummary, Period};
pub use twitter::{CorpusReader, Tweet, TweetTable};
