//! Analysis pipeline - orchestrates the load-categorize-score-report flow.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::analysis::{score_corpus, Categorizer, ScoredTweet};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::{
    default_output_path, save_augmented_csv, save_json, summarize, ChartRenderer, CorpusSummary,
    GroupedSummary, Period,
};
use crate::twitter::{CorpusReader, TweetTable};

/// Summary artifact file name.
pub const SUMMARY_FILE: &str = "summary.json";

/// Where a full analysis run writes its artifacts.
#[derive(Debug, Clone)]
pub struct OutputPlan {
    /// Augmented table path.
    pub table: PathBuf,
    /// Directory for `summary.json` and charts.
    pub artifacts_dir: PathBuf,
    /// Whether to render SVG charts.
    pub charts: bool,
}

impl OutputPlan {
    /// Default plan: table next to the input, artifacts in the same directory.
    #[must_use]
    pub fn for_input(input: &Path) -> Self {
        let table = default_output_path(input);
        let artifacts_dir = table
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            table,
            artifacts_dir,
            charts: true,
        }
    }
}

/// Everything written to `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    /// Whole-corpus figures.
    pub corpus: CorpusSummary,
    /// Groups for the configured period.
    pub grouped: GroupedSummary,
    /// Quarterly breakdown.
    pub quarterly: GroupedSummary,
}

/// A loaded and scored corpus.
pub struct AnalysisRun {
    categorizer: Categorizer,
    table: TweetTable,
    scored: Vec<ScoredTweet>,
}

impl AnalysisRun {
    /// Load and score a corpus with the given configuration.
    pub fn load(config: &AnalysisConfig, input: &Path) -> Result<Self> {
        let categorizer = Categorizer::new(config.lexicon()?)?;
        let table = CorpusReader::new(config.columns.clone()).load(input)?;
        Ok(Self::from_table(categorizer, table))
    }

    /// Score an already loaded table.
    #[must_use]
    pub fn from_table(categorizer: Categorizer, table: TweetTable) -> Self {
        let scored = score_corpus(table.tweets.iter().cloned(), &categorizer);
        Self {
            categorizer,
            table,
            scored,
        }
    }

    /// The categorizer used for scoring.
    #[must_use]
    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// The source table.
    #[must_use]
    pub fn table(&self) -> &TweetTable {
        &self.table
    }

    /// Scored tweets, in input order.
    #[must_use]
    pub fn scored(&self) -> &[ScoredTweet] {
        &self.scored
    }

    /// Build the summary artifact for a configuration.
    #[must_use]
    pub fn summary(&self, config: &AnalysisConfig) -> AnalysisSummary {
        AnalysisSummary {
            corpus: CorpusSummary::build(&self.scored, self.categorizer.lexicon()),
            grouped: summarize(&self.scored, config.period),
            quarterly: summarize(&self.scored, Period::Quarter),
        }
    }

    /// Write the augmented table, summary and charts.
    pub fn write(&self, config: &AnalysisConfig, plan: &OutputPlan) -> Result<AnalysisSummary> {
        save_augmented_csv(&plan.table, &self.table, &self.scored, self.categorizer.lexicon())?;

        let summary = self.summary(config);
        save_json(&plan.artifacts_dir.join(SUMMARY_FILE), &summary)?;

        if plan.charts {
            ChartRenderer::new()?.write_all(&plan.artifacts_dir, &summary.grouped)?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_plan_defaults_next_to_input() {
        let plan = OutputPlan::for_input(Path::new("data/raw/tweets_2022.csv"));
        assert_eq!(plan.table, PathBuf::from("data/raw/tweets_2022_analyzed.csv"));
        assert_eq!(plan.artifacts_dir, PathBuf::from("data/raw"));
        assert!(plan.charts);
    }

    #[test]
    fn test_output_plan_bare_file_name() {
        let plan = OutputPlan::for_input(Path::new("tweets.csv"));
        assert_eq!(plan.table, PathBuf::from("tweets_analyzed.csv"));
        assert_eq!(plan.artifacts_dir, PathBuf::from("."));
    }
}
