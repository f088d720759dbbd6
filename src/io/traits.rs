//! Core row-source trait

use crate::error::Result;
use crate::types::Row;

/// Something that turns raw file bytes into rows.
///
/// Implementations must keep row order stable and preserve the difference
/// between an absent field and an empty one as far as the format allows.
pub trait RowSource {
    /// Parses every data row in `bytes`
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>>;
}

impl<T: RowSource + ?Sized> RowSource for &T {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>> {
        (**self).read_rows(bytes)
    }
}

impl<T: RowSource + ?Sized> RowSource for Box<T> {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>> {
        (**self).read_rows(bytes)
    }
}
