//! Spreadsheet row source (first worksheet of an .xlsx or .xls workbook)

use std::io::{Cursor, Read, Seek};

use calamine::{Data, Range, Reader, Xls, Xlsx};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{CellValue, Row};

use super::format::SourceFormat;
use super::headers::normalize_headers;
use super::traits::RowSource;

/// Reads the first worksheet of a workbook.
///
/// The first row of the used range is the header row. Rows whose cells are
/// all blank are skipped. Numeric cells stay numeric.
#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetSource {
    format: SourceFormat,
}

impl SpreadsheetSource {
    /// Creates a source for a workbook format.
    ///
    /// Fails with `UnsupportedFormat` for non-workbook formats.
    pub fn new(format: SourceFormat) -> Result<Self> {
        if !format.is_spreadsheet() {
            return Err(Error::UnsupportedFormat(format!("{} is not a workbook format", format)));
        }
        Ok(Self { format })
    }

    /// Returns the workbook format
    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

impl RowSource for SpreadsheetSource {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>> {
        let cursor = Cursor::new(bytes);
        let range = match self.format {
            SourceFormat::Xlsx => first_sheet(Xlsx::new(cursor).map_err(calamine::Error::from)?)?,
            SourceFormat::Xls => first_sheet(Xls::new(cursor).map_err(calamine::Error::from)?)?,
            SourceFormat::Csv => {
                return Err(Error::UnsupportedFormat("csv is not a workbook format".to_string()))
            }
        };

        let rows = rows_from_range(&range);
        debug!(format = %self.format, rows = rows.len(), "parsed worksheet");
        Ok(rows)
    }
}

fn first_sheet<RS, R>(mut workbook: R) -> Result<Range<Data>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    calamine::Error: From<R::Error>,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Spreadsheet("Workbook has no worksheets".to_string()))?
        .map_err(|e| Error::from(calamine::Error::from(e)))
}

/// Converts a worksheet range into rows keyed by the header row
pub fn rows_from_range(range: &Range<Data>) -> Vec<Row> {
    let mut iter = range.rows();
    let headers = match iter.next() {
        Some(header_row) => normalize_headers(header_row.iter().map(|c| cell_value(c).as_text().into_owned())),
        None => return Vec::new(),
    };

    iter.map(|cells| {
        headers
            .iter()
            .zip(cells)
            .map(|(name, cell)| (name.as_str(), cell_value(cell)))
            .collect::<Row>()
    })
    .filter(|row| !row.is_blank())
    .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
