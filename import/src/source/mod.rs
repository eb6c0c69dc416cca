//! Where rows come from.

use nsfetch_core::Result;

use crate::Row;

mod bulk;
pub use bulk::bulk_records;
mod csv;
pub use self::csv::CsvSource;
#[cfg(feature = "excel")]
mod excel;
#[cfg(feature = "excel")]
pub use excel::ExcelSource;

/// RowSource reads all rows of a tabular input at once.
pub trait RowSource {
    /// Read every data row, header row excluded.
    fn rows(&self) -> Result<Vec<Row>>;
}

/// Check if this build can read spreadsheets.
pub fn excel_supported() -> bool {
    cfg!(feature = "excel")
}
