//! Tweet corpus module.
//!
//! Provides the tweet record type and loaders for tabular corpora.

mod loader;
mod types;

pub use loader::{CorpusReader, InputFormat, TweetTable};
pub use types::{parse_timestamp, Engagement, Tweet};
