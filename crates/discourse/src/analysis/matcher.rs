//! Whole-word keyword matching.
//!
//! Text and keywords are lowercased before comparison, and each keyword
//! only matches between Unicode word boundaries: `casta` is counted in
//! "la casta" but not in "encastado". Keyword edges that are not word
//! characters (`#casta`, `c++`) need no boundary on that side. Every keyword is counted
//! independently (non-overlapping occurrences) and the counts are summed
//! per frame.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use super::categories::Bucket;
use super::lexicon::{normalize_keyword, Lexicon};
use crate::error::Result;

/// Per-frame occurrence counts for a single text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrameCounts(BTreeMap<String, u32>);

impl FrameCounts {
    /// Count for a frame; frames never seen count as zero.
    #[must_use]
    pub fn get(&self, frame: &str) -> u32 {
        self.0.get(frame).copied().unwrap_or(0)
    }

    /// Sum of all frame counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Iterate over `(frame, count)` pairs in frame-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn insert(&mut self, frame: &str, count: u32) {
        self.0.insert(frame.to_string(), count);
    }
}

#[derive(Debug, Clone)]
struct CompiledFrame {
    name: String,
    bucket: Bucket,
    patterns: Vec<Regex>,
}

/// Compiled form of a [`Lexicon`], ready to count matches in text.
#[derive(Debug, Clone)]
pub struct Categorizer {
    lexicon: Lexicon,
    frames: Vec<CompiledFrame>,
}

impl Categorizer {
    /// Compile every keyword of the lexicon into a word-bounded pattern.
    pub fn new(lexicon: Lexicon) -> Result<Self> {
        let mut frames = Vec::with_capacity(lexicon.frames().len());
        for frame in lexicon.frames() {
            let patterns = frame
                .keywords
                .iter()
                .map(|keyword| keyword_pattern(keyword))
                .collect::<Result<Vec<_>>>()?;
            frames.push(CompiledFrame {
                name: frame.name.clone(),
                bucket: frame.bucket,
                patterns,
            });
        }
        tracing::debug!(
            frames = frames.len(),
            keywords = lexicon.keyword_count(),
            "Compiled keyword patterns"
        );
        Ok(Self { lexicon, frames })
    }

    /// The lexicon this categorizer was built from.
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Bucket that a frame rolls up into.
    #[must_use]
    pub fn bucket_of(&self, frame: &str) -> Option<Bucket> {
        self.frames
            .iter()
            .find(|f| f.name == frame)
            .map(|f| f.bucket)
    }

    /// Count keyword occurrences per frame.
    ///
    /// Missing text is treated as empty. Every frame of the lexicon is
    /// present in the result, with zero when nothing matched.
    #[must_use]
    pub fn categorize(&self, text: Option<&str>) -> FrameCounts {
        let lowered = text.unwrap_or_default().to_lowercase();
        let mut counts = FrameCounts::default();
        for frame in &self.frames {
            let count = if lowered.is_empty() {
                0
            } else {
                frame
                    .patterns
                    .iter()
                    .map(|p| p.find_iter(&lowered).count() as u32)
                    .sum()
            };
            counts.insert(&frame.name, count);
        }
        counts
    }
}

/// Word boundaries are only required on sides where the keyword starts or
/// ends with a word character, so `#casta` and `c++` still match.
fn keyword_pattern(keyword: &str) -> Result<Regex> {
    let normalized = normalize_keyword(keyword);
    let boundary = |c: Option<char>| {
        if c.is_some_and(is_word_char) {
            r"\b"
        } else {
            ""
        }
    };
    let pattern = format!(
        "{}{}{}",
        boundary(normalized.chars().next()),
        regex::escape(&normalized),
        boundary(normalized.chars().last()),
    );
    Ok(Regex::new(&pattern)?)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
