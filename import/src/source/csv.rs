use log::debug;
use nsfetch_core::{Error, Result};
use serde_json::Value;

use super::RowSource;
use crate::Row;

/// CsvSource reads rows from CSV content whose first record is the header row.
///
/// Every value stays a string. Empty lines are skipped.
#[derive(Debug, Clone)]
pub struct CsvSource {
    content: Vec<u8>,
}

impl CsvSource {
    /// Create a source over CSV content.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl RowSource for CsvSource {
    fn rows(&self) -> Result<Vec<Row>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::None)
            .from_reader(self.content.as_slice());

        let headers = reader
            .headers()
            .map_err(|err| {
                Error::parse_invalid(format!("failed to read csv header: {err}")).with_source(err)
            })?
            .clone();

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|err| {
                Error::parse_invalid(format!("failed to read csv row {}: {err}", idx + 1))
                    .with_source(err)
            })?;

            rows.push(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, v)| (h, Value::String(v.to_string())))
                    .collect(),
            );
        }

        debug!("read {} rows from csv with {} columns", rows.len(), headers.len());
        Ok(rows)
    }
}
