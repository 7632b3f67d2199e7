//! Augmented table and summary artifacts.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::analysis::{Bucket, Lexicon, ScoredTweet};
use crate::error::{DiscourseError, Result};
use crate::twitter::TweetTable;

/// Derived date and engagement columns, appended after the source columns.
const DERIVED_COLUMNS: [&str; 4] = ["year", "month", "quarter", "total_engagement"];

/// Score column, always last.
pub const INTENSITY_COLUMN: &str = "security_intensity";

/// Default output path: `tweets.csv` becomes `tweets_analyzed.csv`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "tweets".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_analyzed.csv"))
}

/// Columns the analysis appends, in output order.
fn generated_columns(lexicon: &Lexicon) -> Vec<String> {
    let mut columns: Vec<String> = DERIVED_COLUMNS.iter().map(ToString::to_string).collect();
    columns.extend(lexicon.frames().iter().map(|f| f.name.clone()));
    columns.extend(Bucket::all().iter().map(|b| b.total_column().to_string()));
    columns.push(INTENSITY_COLUMN.to_string());
    columns
}

/// Indices of source columns passed through unchanged.
///
/// A source column named like a generated one (for example when an
/// `_analyzed.csv` is analyzed again) is replaced by the fresh value.
fn kept_source_columns(source: &[String], generated: &[String]) -> Vec<usize> {
    source
        .iter()
        .enumerate()
        .filter(|(_, name)| !generated.contains(name))
        .map(|(i, _)| i)
        .collect()
}

/// Column headers of the augmented table.
#[must_use]
pub fn augmented_headers(source: &[String], lexicon: &Lexicon) -> Vec<String> {
    let generated = generated_columns(lexicon);
    let mut headers: Vec<String> = kept_source_columns(source, &generated)
        .into_iter()
        .map(|i| source[i].clone())
        .collect();
    headers.extend(generated);
    headers
}

/// Write the source table augmented with frame counts, bucket totals and score.
///
/// `scored[i]` must be the scored form of `table.tweets[i]`.
pub fn write_augmented_csv<W: Write>(
    writer: W,
    table: &TweetTable,
    scored: &[ScoredTweet],
    lexicon: &Lexicon,
) -> Result<()> {
    let generated = generated_columns(lexicon);
    let kept = kept_source_columns(&table.headers, &generated);
    if kept.len() < table.headers.len() {
        tracing::warn!(
            replaced = table.headers.len() - kept.len(),
            "Source columns named like analysis columns are replaced"
        );
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(augmented_headers(&table.headers, lexicon))?;

    for (row, s) in table.rows.iter().zip(scored) {
        let tweet = s.tweet();
        let opt = |v: Option<String>| v.unwrap_or_default();

        let mut record: Vec<String> = kept
            .iter()
            .map(|&i| row.get(i).cloned().unwrap_or_default())
            .collect();
        record.push(opt(tweet.year().map(|y| y.to_string())));
        record.push(opt(tweet.month().map(|m| m.to_string())));
        record.push(opt(tweet.quarter().map(|q| q.to_string())));
        record.push(opt(tweet.engagement.total().map(|e| e.to_string())));
        for frame in lexicon.frames() {
            record.push(s.counts().get(&frame.name).to_string());
        }
        for bucket in Bucket::all() {
            record.push(s.totals().get(*bucket).to_string());
        }
        record.push(s.security_intensity().to_string());

        csv_writer.write_record(&record)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Save the augmented table to a file, creating parent directories.
pub fn save_augmented_csv(
    path: &Path,
    table: &TweetTable,
    scored: &[ScoredTweet],
    lexicon: &Lexicon,
) -> Result<()> {
    let file = create(path)?;
    write_augmented_csv(file, table, scored, lexicon)?;
    tracing::info!(path = %path.display(), rows = scored.len(), "Saved augmented table");
    Ok(())
}

/// Save any serializable artifact as pretty JSON.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    ensure_parent(path)?;
    std::fs::write(path, content).map_err(|e| DiscourseError::io(path, e))?;
    tracing::debug!(path = %path.display(), "Saved JSON artifact");
    Ok(())
}

/// Create a file for writing, creating parent directories.
pub(crate) fn create(path: &Path) -> Result<File> {
    ensure_parent(path)?;
    File::create(path).map_err(|e| DiscourseError::io(path, e))
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DiscourseError::io(parent, e))?;
    }
    Ok(())
}
