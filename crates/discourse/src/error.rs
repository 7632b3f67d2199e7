//! Error types for the discourse analysis library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, scoring, or reporting a corpus.
#[derive(Debug, Error)]
pub enum DiscourseError {
    /// Filesystem read or write failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tabular input or output failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet input could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Spreadsheet output could not be written
    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// JSON input or summary serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config or lexicon file could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Chart template failed to render
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::RenderError>),

    /// Chart template failed to register
    #[error("Template registration error: {0}")]
    TemplateRegistration(#[from] Box<handlebars::TemplateError>),

    /// A keyword could not be compiled into a matcher
    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Input extension is not one we know how to read
    #[error("Unsupported input format for {0}: expected .csv, .json, .jsonl or .xlsx")]
    UnsupportedFormat(PathBuf),

    /// Spreadsheet has no worksheet to read
    #[error("No worksheet found in {0}")]
    EmptyWorkbook(PathBuf),

    /// A required column is not present in the input header
    #[error("Required column '{0}' not found in input")]
    MissingColumn(String),

    /// The keyword dictionary violates one of its invariants
    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    /// Unknown aggregation period name
    #[error("Unknown period '{0}': expected year, quarter or month")]
    InvalidPeriod(String),
}

impl DiscourseError {
    /// Wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<handlebars::RenderError> for DiscourseError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Template(Box::new(err))
    }
}

impl From<handlebars::TemplateError> for DiscourseError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::TemplateRegistration(Box::new(err))
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, DiscourseError>;
