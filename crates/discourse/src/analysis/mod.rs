//! Keyword framing analysis module.
//!
//! Counts lexicon keywords per frame and rolls them up into bucket totals
//! and the security intensity score.

mod categories;
mod lexicon;
mod matcher;
mod scorer;

pub use categories::Bucket;
pub use lexicon::{Frame, Lexicon};
pub use matcher::{Categorizer, FrameCounts};
pub use scorer::{score_corpus, BucketTotals, ScoredTweet};
