use std::collections::HashMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use log::debug;
use nsfetch_core::{Error, Result};
use serde_json::Value;

use super::RowSource;
use crate::Row;

/// ExcelSource reads rows from the first worksheet of a spreadsheet (xlsx, xlsm, xls, ods).
///
/// The first row is the header row. Empty cells are left out of the row and
/// rows without any value are skipped.
#[derive(Debug, Clone)]
pub struct ExcelSource {
    content: Vec<u8>,
}

impl ExcelSource {
    /// Create a source over spreadsheet content.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl RowSource for ExcelSource {
    fn rows(&self) -> Result<Vec<Row>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(self.content.as_slice()))
            .map_err(|err| Error::parse_invalid(format!("failed to open spreadsheet: {err}")))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::parse_invalid("spreadsheet has no worksheet"))?
            .map_err(|err| Error::parse_invalid(format!("failed to read worksheet: {err}")))?;

        let rows = range_rows(&range);
        debug!("read {} rows from the first worksheet", rows.len());
        Ok(rows)
    }
}

fn range_rows(range: &Range<Data>) -> Vec<Row> {
    let mut lines = range.rows();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = header_names(header_line);

    lines
        .map(|line| {
            headers
                .iter()
                .zip(line.iter())
                .filter_map(|(header, cell)| cell_value(cell).map(|v| (header.as_str(), v)))
                .collect::<Row>()
        })
        .filter(|row| !row.is_empty())
        .collect()
}

/// Name header cells, filling blanks with `__EMPTY` and suffixing duplicates with `_n`.
fn header_names(line: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    line.iter()
        .map(|cell| {
            let base = match cell_value(cell) {
                Some(Value::String(s)) => s,
                Some(v) => v.to_string(),
                None => "__EMPTY".to_string(),
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn cell_value(cell: &Data) -> Option<Value> {
    Some(match cell {
        Data::Empty => return None,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::from(*f as i64),
        Data::Float(f) => Value::from(*f),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    })
}
