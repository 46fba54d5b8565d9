//! Records displayed by the table.
//!
//! A [`Record`] is an opaque mapping from column key to a [`CellValue`]
//! plus a unique `id`. The table never mutates records; every view over
//! them (filtered, sorted, paged) is a sequence of shared [`Arc`] handles,
//! so identity is preserved across the whole pipeline.

mod column;

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

pub use column::{humanize_key, infer_columns, Column};

/// Key under which a record's identifier is stored.
pub const ID_KEY: &str = "id";

/// An ordered, shared sequence of records.
///
/// Cloning a `RecordList` is cheap and keeps pointer identity, which the
/// sort cache relies on to detect a changed input.
pub type RecordList = Arc<[Arc<Record>]>;

/// Errors that can occur while loading record data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Failed to read the data file.
    #[error("Failed to read data file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The data file is not valid JSON.
    #[error("Failed to parse data file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A single displayable value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free text. Date-like values arrive in this form.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Explicit null.
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<Value> for CellValue {
    /// Coerce any JSON value. Nested arrays and objects keep their JSON text.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => CellValue::Text(s),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// One data row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    fields: IndexMap<String, CellValue>,
}

impl Record {
    /// Create an empty record with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The record's unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the raw value for a column key.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.get(key)
    }

    /// String form of the value at `key`.
    ///
    /// Missing keys coerce to the empty string, except `id`, which falls
    /// back to the record identifier.
    pub fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(value) => value.to_string(),
            None if key == ID_KEY => self.id.clone(),
            None => String::new(),
        }
    }

    /// Iterate over the field keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Build a record from a JSON object.
    ///
    /// `position` is used as the identifier when the object has no `id`.
    /// Returns `None` for anything that is not an object.
    pub fn from_json(value: Value, position: usize) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        let id = match map.get(ID_KEY) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                warn!(position, "Record has no usable id, using its position");
                position.to_string()
            }
        };

        let fields = map
            .into_iter()
            .map(|(key, value)| (key, CellValue::from(value)))
            .collect();

        Some(Self { id, fields })
    }
}

/// Convert a JSON document into records.
///
/// A document that is not an array is logged and yields no records;
/// non-object entries are skipped.
pub fn records_from_json(value: Value) -> Vec<Record> {
    let Value::Array(items) = value else {
        error!("Expected an array of records");
        return Vec::new();
    };

    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let record = Record::from_json(item, position);
            if record.is_none() {
                warn!(position, "Skipping entry that is not an object");
            }
            record
        })
        .collect();

    debug!(total, loaded = records.len(), "Parsed records");
    records
}

/// Load records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<Record>, DataError> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    Ok(records_from_json(value))
}

/// Wrap owned records into a shareable list.
pub fn into_record_list(records: Vec<Record>) -> RecordList {
    records.into_iter().map(Arc::new).collect()
}
