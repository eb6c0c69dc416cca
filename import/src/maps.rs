//! Field and value overrides loaded from JSON map files.

use std::collections::HashMap;

use nsfetch_core::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Header to field path overrides.
///
/// An entry wins over the identifier derived from the header, unless it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(HashMap<String, String>);

impl FieldMap {
    /// Parse a field map from JSON content, like `{"Customer Name": "companyName"}`.
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        serde_json::from_slice(content)
            .map_err(|err| Error::from(err).with_context("failed to parse field map"))
    }

    /// Add an override.
    pub fn insert(&mut self, header: impl Into<String>, field: impl Into<String>) {
        self.0.insert(header.into(), field.into());
    }

    /// Get the non-empty override for a header.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0
            .get(header)
            .map(String::as_str)
            .filter(|field| !field.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Per header substitutions keyed by the string form of the raw value.
///
/// ```json
/// {"Status": {"A": "Active", "I": "Inactive"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(HashMap<String, Map<String, Value>>);

impl ValueMap {
    /// Parse a value map from JSON content.
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        serde_json::from_slice(content)
            .map_err(|err| Error::from(err).with_context("failed to parse value map"))
    }

    /// Add a substitution.
    pub fn insert(&mut self, header: impl Into<String>, raw: impl Into<String>, value: Value) {
        self.0
            .entry(header.into())
            .or_default()
            .insert(raw.into(), value);
    }

    /// Look up the substitution for `value` under `header`.
    ///
    /// A present entry is returned even when it maps to `null`.
    pub fn get(&self, header: &str, value: &Value) -> Option<&Value> {
        self.0.get(header)?.get(&value_key(value))
    }
}

/// String form of a raw value as used for value map keys.
fn value_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        v => v.to_string(),
    }
}
