//! Conversion between field records and key/value mappings.
//!
//! Read path: [`to_key_value`] and [`to_key_value_remapped`] turn parsed
//! records into an ordered title → value mapping.
//!
//! Write path: [`normalize_for_fill`] rewrites boolean values into the
//! checkbox states `Yes` / `Off` before the mapping is encoded.
//!
//! All functions here are pure and total.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dump::FieldRecord;
use crate::error::Result;

/// Checkbox state written for `true`.
pub const CHECKBOX_ON: &str = "Yes";
/// Checkbox state written for `false`.
pub const CHECKBOX_OFF: &str = "Off";

/// Ordered mapping from field name to value.
pub type FieldMap = IndexMap<String, FieldValue>;

/// Renaming of field titles to caller keys, applied on the read path.
pub type RemapTable = HashMap<String, String>;

/// A value for one form field.
///
/// Deserializes from plain JSON values: strings, booleans, numbers,
/// arrays of strings and `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state
    Boolean(bool),
    /// Number, written as its decimal text
    Number(serde_json::Number),
    /// Text value
    Text(String),
    /// Selected options of a multi-select choice field
    Array(Vec<String>),
    /// No value; written as an empty string
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Array(items) => f.write_str(&items.join(", ")),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Array(value)
    }
}

/// Map each record's title to its value, in record order.
///
/// Values stay as extracted text. A title seen twice keeps its first
/// position and its last value.
pub fn to_key_value(records: &[FieldRecord]) -> FieldMap {
    records
        .iter()
        .map(|record| {
            (
                record.title.clone(),
                FieldValue::Text(record.field_value.clone()),
            )
        })
        .collect()
}

/// Like [`to_key_value`], then rename keys found in `remap`.
///
/// Keys missing from the table are kept as they are. Values are never
/// touched by remapping.
pub fn to_key_value_remapped(records: &[FieldRecord], remap: &RemapTable) -> FieldMap {
    to_key_value(records)
        .into_iter()
        .map(|(key, value)| match remap.get(&key) {
            Some(mapped) => (mapped.clone(), value),
            None => (key, value),
        })
        .collect()
}

/// Build a caller-keyed mapping from parsed records.
///
/// Same as [`to_key_value_remapped`].
pub fn map_form_to_pdf(records: &[FieldRecord], remap: &RemapTable) -> FieldMap {
    to_key_value_remapped(records, remap)
}

/// Rewrite booleans into checkbox states for filling.
///
/// `true` becomes `"Yes"`, `false` becomes `"Off"`; other values and all
/// keys pass through unchanged.
pub fn normalize_for_fill(values: FieldMap) -> FieldMap {
    values
        .into_iter()
        .map(|(key, value)| (key, normalize_value(value)))
        .collect()
}

fn normalize_value(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Boolean(true) => FieldValue::Text(CHECKBOX_ON.to_string()),
        FieldValue::Boolean(false) => FieldValue::Text(CHECKBOX_OFF.to_string()),
        other => other,
    }
}

/// Read a field mapping from a JSON object, keeping key order.
pub fn field_map_from_json(json: &str) -> Result<FieldMap> {
    Ok(serde_json::from_str(json)?)
}
