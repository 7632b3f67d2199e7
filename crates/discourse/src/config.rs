//! Analysis configuration.
//!
//! Every field has a default matching the Argentine presidential corpus, so a
//! config file only needs to name what differs:
//!
//! ```toml
//! high_intensity_threshold = 4
//! period = "quarter"
//! lexicon = "lexicons/custom.toml"
//!
//! [columns]
//! timestamp = "created_at"
//! text = "full_text"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::Lexicon;
use crate::error::{DiscourseError, Result};
use crate::report::Period;

/// Default minimum intensity for the high-intensity export.
pub const DEFAULT_HIGH_INTENSITY_THRESHOLD: u32 = 3;

/// Column names used to read tweets from tabular input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Tweet ID column. Falls back to the 1-based row number when absent.
    pub id: String,
    /// Publication timestamp column.
    pub timestamp: String,
    /// Tweet body column.
    pub text: String,
    /// Optional likes column.
    pub likes: String,
    /// Optional retweets column.
    pub retweets: String,
    /// Optional replies column.
    pub replies: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            timestamp: "timeParsed".to_string(),
            text: "text".to_string(),
            likes: "likes".to_string(),
            retweets: "retweets".to_string(),
            replies: "replies".to_string(),
        }
    }
}

/// Configuration for a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Input column names.
    pub columns: ColumnConfig,
    /// Optional lexicon file replacing the built-in Spanish dictionary.
    /// Relative paths resolve against the config file's directory.
    pub lexicon: Option<PathBuf>,
    /// Minimum intensity for the high-intensity export.
    pub high_intensity_threshold: u32,
    /// Time unit used for grouped summaries and charts.
    pub period: Period,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            lexicon: None,
            high_intensity_threshold: DEFAULT_HIGH_INTENSITY_THRESHOLD,
            period: Period::Year,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DiscourseError::io(path, e))?;
        let mut config: Self = toml::from_str(&content)?;

        if let Some(lexicon) = &config.lexicon {
            if lexicon.is_relative() {
                if let Some(parent) = path.parent() {
                    config.lexicon = Some(parent.join(lexicon));
                }
            }
        }

        tracing::debug!(path = %path.display(), "Loaded analysis config");
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Resolve the lexicon this run should use.
    pub fn lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon {
            Some(path) => Lexicon::load(path),
            None => Ok(Lexicon::spanish_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_corpus_layout() {
        let config = AnalysisConfig::default();
        assert_eq!(config.columns.timestamp, "timeParsed");
        assert_eq!(config.columns.text, "text");
        assert_eq!(config.high_intensity_threshold, 3);
        assert_eq!(config.period, Period::Year);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("discourse.toml");
        std::fs::write(
            &path,
            "period = \"quarter\"\nlexicon = \"custom.toml\"\n\n[columns]\ntext = \"full_text\"\n",
        )
        .expect("write");

        let config = AnalysisConfig::load(&path).expect("load");
        assert_eq!(config.period, Period::Quarter);
        assert_eq!(config.columns.text, "full_text");
        assert_eq!(config.columns.timestamp, "timeParsed");
        assert_eq!(config.lexicon, Some(dir.path().join("custom.toml")));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = AnalysisConfig::load(Path::new("/nonexistent/discourse.toml"));
        assert!(matches!(result, Err(DiscourseError::Io { .. })));
    }
}
