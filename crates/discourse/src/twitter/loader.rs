//! Corpus loading from CSV and JSON files.

use calamine::{open_workbook_auto, Data, Reader};
use serde_json::Value;
use std::fs::File;
use std::path::Path;

use super::types::{parse_timestamp, Engagement, Tweet};
use crate::config::ColumnConfig;
use crate::error::{DiscourseError, Result};

/// Supported input layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A JSON array of objects.
    Json,
    /// One JSON object per line.
    JsonLines,
    /// First worksheet of an Excel or OpenDocument workbook, header in the first row.
    Spreadsheet,
}

impl InputFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some("jsonl" | "ndjson") => Ok(Self::JsonLines),
            Some("xlsx" | "xlsm" | "xls" | "ods") => Ok(Self::Spreadsheet),
            _ => Err(DiscourseError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Loaded corpus: the source table plus the tweets parsed from it.
///
/// `rows[i]` is the untouched source row of `tweets[i]`, aligned with
/// `headers`, so writers can pass every original column through.
#[derive(Debug, Clone, Default)]
pub struct TweetTable {
    /// Source column names in input order.
    pub headers: Vec<String>,
    /// Source cell values per row.
    pub rows: Vec<Vec<String>>,
    /// Parsed tweets, one per row.
    pub tweets: Vec<Tweet>,
    /// 1-based data row numbers that had more cells than the header.
    /// The extra cells are not part of `rows`.
    pub truncated: Vec<usize>,
}

impl TweetTable {
    /// Number of tweets loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    /// Whether the table holds no tweets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    /// Number of tweets without a usable timestamp.
    #[must_use]
    pub fn undated(&self) -> usize {
        self.tweets.iter().filter(|t| t.posted_at.is_none()).count()
    }
}

/// Reads tweet corpora using a column mapping.
pub struct CorpusReader {
    columns: ColumnConfig,
}

impl CorpusReader {
    /// Create a reader for the given column names.
    #[must_use]
    pub fn new(columns: ColumnConfig) -> Self {
        Self { columns }
    }

    /// Load a corpus, picking the parser from the file extension.
    pub fn load(&self, path: &Path) -> Result<TweetTable> {
        let format = InputFormat::from_path(path)?;
        let file = File::open(path).map_err(|e| DiscourseError::io(path, e))?;

        let table = match format {
            InputFormat::Csv => self.read_csv(file)?,
            InputFormat::Json => {
                let values: Vec<Value> = serde_json::from_reader(file)?;
                self.table_from_json(values)?
            }
            InputFormat::Spreadsheet => {
                drop(file);
                self.read_workbook(path)?
            }
            InputFormat::JsonLines => {
                let content =
                    std::io::read_to_string(file).map_err(|e| DiscourseError::io(path, e))?;
                let values = content
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(serde_json::from_str::<Value>)
                    .collect::<std::result::Result<Vec<Value>, _>>()?;
                self.table_from_json(values)?
            }
        };

        tracing::info!(
            path = %path.display(),
            tweets = table.len(),
            undated = table.undated(),
            "Loaded corpus"
        );
        Ok(table)
    }

    /// Parse CSV from any reader.
    ///
    /// Short rows are padded with empty cells. Long rows are cut to the
    /// header width and listed in [`TweetTable::truncated`].
    pub fn read_csv<R: std::io::Read>(&self, reader: R) -> Result<TweetTable> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        self.build_aligned(headers, rows)
    }

    /// Read the first worksheet of a workbook.
    pub fn read_workbook(&self, path: &Path) -> Result<TweetTable> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DiscourseError::EmptyWorkbook(path.to_path_buf()))??;

        let mut sheet_rows = range.rows();
        let headers: Vec<String> = sheet_rows
            .next()
            .map(|row| row.iter().map(sheet_cell).collect())
            .unwrap_or_default();
        let rows = sheet_rows
            .map(|row| row.iter().map(sheet_cell).collect())
            .collect();
        self.build_aligned(headers, rows)
    }

    /// Fit every row to the header width, then build.
    fn build_aligned(&self, headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Result<TweetTable> {
        let width = headers.len();
        let mut truncated = Vec::new();
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > width {
                let dropped = row.len() - width;
                let extra = row[width..].iter().filter(|c| !c.trim().is_empty()).count();
                if extra > 0 {
                    tracing::warn!(
                        row = i + 1,
                        dropped,
                        "Row has more cells than the header, extra cells dropped"
                    );
                    truncated.push(i + 1);
                }
            }
            row.resize(width, String::new());
        }

        let mut table = self.build(headers, rows)?;
        table.truncated = truncated;
        Ok(table)
    }

    /// Flatten JSON objects into a table; a key seen in any object becomes a column.
    fn table_from_json(&self, values: Vec<Value>) -> Result<TweetTable> {
        let mut headers: Vec<String> = Vec::new();
        for value in &values {
            if let Value::Object(map) = value {
                for key in map.keys() {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
        }

        let rows = values
            .iter()
            .map(|value| {
                headers
                    .iter()
                    .map(|h| value.get(h).map(json_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        self.build(headers, rows)
    }

    fn build(&self, headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<TweetTable> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            position(name).ok_or_else(|| DiscourseError::MissingColumn(name.to_string()))
        };

        let text_idx = require(&self.columns.text)?;
        let time_idx = require(&self.columns.timestamp)?;
        let id_idx = position(&self.columns.id);
        let likes_idx = position(&self.columns.likes);
        let retweets_idx = position(&self.columns.retweets);
        let replies_idx = position(&self.columns.replies);

        let mut tweets = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(String::as_str);

            let id = cell(id_idx)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map_or_else(|| (i + 1).to_string(), str::to_string);
            let text = cell(Some(text_idx))
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string);
            let posted_at = cell(Some(time_idx)).and_then(parse_timestamp);
            if posted_at.is_none() {
                tracing::debug!(id = %id, "Tweet has no usable timestamp");
            }
            let engagement = Engagement {
                likes: cell(likes_idx).and_then(parse_count),
                retweets: cell(retweets_idx).and_then(parse_count),
                replies: cell(replies_idx).and_then(parse_count),
            };

            tweets.push(Tweet::new(id, posted_at, text).with_engagement(engagement));
        }

        Ok(TweetTable {
            headers,
            rows,
            tweets,
            truncated: Vec::new(),
        })
    }
}

impl Default for CorpusReader {
    fn default() -> Self {
        Self::new(ColumnConfig::default())
    }
}

fn sheet_cell(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_datetime().map_or_else(
            || dt.as_f64().to_string(),
            |naive| naive.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
    }
}

fn json_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse an engagement counter, tolerating float renderings like `12.0`.
///
/// Negative, non-finite and out-of-range values are treated as missing.
fn parse_count(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }
    value
        .parse::<f64>()
        .ok()
        .map(f64::round)
        .filter(|f| f.is_finite() && *f >= 0.0 && *f < U64_LIMIT)
        .map(|f| f as u64)
}

/// 2^64, the first float no `u64` can hold.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;
