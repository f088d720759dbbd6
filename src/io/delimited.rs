//! CSV row source

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::Result;
use crate::types::{CellValue, Row};

use super::headers::normalize_headers;
use super::traits::RowSource;

/// Reads CSV with a header line.
///
/// Empty lines are skipped; rows with fewer fields than the header leave the
/// trailing fields absent, and surplus fields are ignored. Invalid UTF-8 is
/// replaced rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSource;

impl CsvSource {
    /// Creates a comma-delimited source
    pub fn new() -> Self {
        Self
    }
}

impl RowSource for CsvSource {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let raw_headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        let headers = normalize_headers(&raw_headers);

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = StringRecord::from_byte_record_lossy(record?);
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.as_str(), CellValue::from(value)))
                .collect();
            rows.push(row);
        }

        debug!(columns = headers.len(), rows = rows.len(), "parsed CSV");
        Ok(rows)
    }
}
