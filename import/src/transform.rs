//! Turn tabular rows into nested JSON payloads.

use log::debug;
use nsfetch_core::{Error, Result};
use serde_json::{Map, Value};

use crate::field::{resolve, resolve_path};
use crate::maps::{FieldMap, ValueMap};
use crate::Row;

/// A transformed record, ready to be sent as a request body.
pub type Payload = Map<String, Value>;

/// What to do when a dotted path runs through a value that is not a mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Replace the scalar with a new mapping. Later headers win.
    #[default]
    Overwrite,
    /// Fail the row with [`nsfetch_core::ErrorKind::PathConflict`].
    Reject,
}

/// Options of [`RowTransformer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Treat `.` in headers as path separators instead of word separators.
    pub nested_headers: bool,
    /// Policy for intermediate path segments bound to scalars.
    pub on_conflict: ConflictPolicy,
}

/// RowTransformer builds a [`Payload`] out of every [`Row`].
///
/// Each header contributes exactly one leaf, assigned in column order: the
/// value goes through the [`ValueMap`] first, then lands at the field path
/// taken from the [`FieldMap`] or derived from the header.
#[derive(Debug, Clone, Default)]
pub struct RowTransformer {
    field_map: FieldMap,
    value_map: ValueMap,
    options: TransformOptions,
}

impl RowTransformer {
    /// Create a transformer without overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header to field path overrides.
    pub fn with_field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    /// Set the value substitutions.
    pub fn with_value_map(mut self, value_map: ValueMap) -> Self {
        self.value_map = value_map;
        self
    }

    /// Set the options.
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Field path a header is assigned to.
    pub fn field_path(&self, header: &str) -> String {
        match self.field_map.get(header) {
            Some(field) => field.to_string(),
            None if self.options.nested_headers => resolve_path(header),
            None => resolve(header),
        }
    }

    /// Transform one row.
    pub fn transform(&self, row: &Row) -> Result<Payload> {
        let mut payload = Payload::new();

        for (header, raw) in row.iter() {
            let value = self
                .value_map
                .get(header, raw)
                .unwrap_or(raw)
                .clone();
            let path = self.field_path(header);

            insert_path(&mut payload, &path, value, self.options.on_conflict)
                .map_err(|err| err.with_context(format!("header {header:?}")))?;
        }

        Ok(payload)
    }

    /// Transform all rows in order, stopping at the first failure.
    pub fn transform_all(&self, rows: &[Row]) -> Result<Vec<Payload>> {
        let payloads = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                self.transform(row)
                    .map_err(|err| err.with_context(format!("row {}", idx + 1)))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("transformed {} rows into payloads", payloads.len());
        Ok(payloads)
    }
}

/// Assign `value` at the dotted `path`, creating intermediate mappings.
fn insert_path(
    payload: &mut Payload,
    path: &str,
    value: Value,
    on_conflict: ConflictPolicy,
) -> Result<()> {
    let mut segments: Vec<&str> = path.split('.').collect();
    // split always yields at least one segment.
    let last = segments.pop().unwrap_or_default();

    let mut node = payload;
    for (depth, segment) in segments.iter().enumerate() {
        let slot = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !slot.is_object() {
            if on_conflict == ConflictPolicy::Reject {
                return Err(Error::path_conflict(format!(
                    "field path {path:?} runs through {:?} which already holds a value",
                    segments[..=depth].join(".")
                )));
            }
            *slot = Value::Object(Map::new());
        }

        node = match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just made a mapping"),
        };
    }

    node.insert(last.to_string(), value);
    Ok(())
}
