//! Error types for survey-kml

use std::io;
use thiserror::Error;

/// Result type for survey-kml operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole conversion.
///
/// Per-row problems are not errors; they are reported as [`Rejection`]s and
/// the row is skipped.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file extension is not a recognised tabular format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The UTM zone token could not be parsed
    #[error("Invalid UTM zone '{0}': expected 1-60 followed by N or S (e.g. 51S)")]
    ZoneParse(String),

    /// Every row was rejected, or there were no rows at all
    #[error("No usable points found")]
    NoUsablePoints,

    /// CSV tokenizer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet reader error
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Projection error
    #[error("Projection error: {0}")]
    Projection(String),
}

impl From<calamine::Error> for Error {
    fn from(error: calamine::Error) -> Self {
        Error::Spreadsheet(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Config(error.to_string())
    }
}

/// Why a single row produced no point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Neither a geographic nor a projected coordinate pair could be resolved
    MissingCoordinate,
    /// The projected pair could not be transformed to a finite position
    ProjectionFailure,
}

impl Rejection {
    /// Returns a short, stable name for logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            Rejection::MissingCoordinate => "missing_coordinate",
            Rejection::ProjectionFailure => "projection_failure",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
