use serde_json::{Map, Value};

/// One imported record: header to raw value pairs in column order.
///
/// Raw values are strings, numbers, booleans or null, as produced by the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell.
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<Value>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Append a cell, builder style.
    pub fn with(mut self, header: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(header, value);
        self
    }

    /// Get the value of the first cell with this header.
    pub fn get(&self, header: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    /// Iterate cells in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v))
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}
