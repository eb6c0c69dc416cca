//! Tabular import for nsfetch.
//!
//! Rows are read from a [`RowSource`] (CSV, or spreadsheets with the `excel`
//! feature), then a [`RowTransformer`] turns every [`Row`] into a nested JSON
//! [`Payload`]. Headers are mapped to field identifiers by [`resolve`] unless a
//! [`FieldMap`] says otherwise, and raw values can be substituted through a
//! [`ValueMap`].
//!
//! ```
//! use nsfetch_import::{CsvSource, RowSource, RowTransformer};
//!
//! # fn main() -> nsfetch_core::Result<()> {
//! let rows = CsvSource::new("Customer Name,Status\nAcme,A\n").rows()?;
//! let payloads = RowTransformer::new().transform_all(&rows)?;
//!
//! assert_eq!(payloads[0]["customerName"], "Acme");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod field;
pub use field::{resolve, resolve_path};
mod maps;
pub use maps::{FieldMap, ValueMap};
mod row;
pub use row::Row;
mod source;
#[cfg(feature = "excel")]
pub use source::ExcelSource;
pub use source::{bulk_records, excel_supported, CsvSource, RowSource};
mod transform;
pub use transform::{ConflictPolicy, Payload, RowTransformer, TransformOptions};
