//! Row sources for survey-kml
//!
//! Turns CSV and spreadsheet bytes into [`Row`]s. Which reader is used
//! depends only on the file name's extension.

pub mod delimited;
pub mod format;
pub mod headers;
pub mod spreadsheet;
pub mod traits;

pub use delimited::CsvSource;
pub use format::SourceFormat;
pub use spreadsheet::SpreadsheetSource;
pub use traits::RowSource;

use tracing::info;

use crate::error::Result;
use crate::types::Row;

/// Returns the row source for `format`
pub fn source_for(format: SourceFormat) -> Result<Box<dyn RowSource + Send + Sync>> {
    Ok(match format {
        SourceFormat::Csv => Box::new(CsvSource::new()),
        SourceFormat::Xlsx | SourceFormat::Xls => Box::new(SpreadsheetSource::new(format)?),
    })
}

/// Parses `bytes` as the format implied by `file_name`
pub fn read_rows(file_name: &str, bytes: &[u8]) -> Result<Vec<Row>> {
    let format = SourceFormat::from_file_name(file_name)?;
    let rows = source_for(format)?.read_rows(bytes)?;
    info!(file = file_name, %format, rows = rows.len(), "read input rows");
    Ok(rows)
}
