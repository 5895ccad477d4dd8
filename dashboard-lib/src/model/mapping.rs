//! Mapping from backend JSON into local record shapes.
//!
//! The webhook backend returns loosely shaped JSON: sometimes an array of
//! objects, sometimes an object keyed by record ID. Every page maps that
//! payload into its own row type before handing rows to the table engine,
//! so parsing uncertainty stays at this boundary.
//!
//! ## Value Conversion
//!
//! - `"YYYY-MM-DD"` strings become [`Value::Date`]
//! - RFC 3339 strings become [`Value::DateTime`] (keeping their offset)
//! - integers become `Int` when they fit, `Long` otherwise
//! - arrays and objects are kept as [`Value::Json`]
//!
//! ## Record IDs
//!
//! A record's ID is read from its `id` field (strings and integers). Entries
//! of an object-keyed collection that carry no `id` inherit their key.

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;
use crate::error::MappingError;

/// Field name holding the record identifier.
pub const ID_FIELD: &str = "id";

/// Conversion from a backend JSON value into a local row type.
///
/// Implement this for page-specific structs when the dynamic [`Record`] is
/// not enough.
///
/// # Example
///
/// ```
/// use dashboard_lib::error::{FieldError, MappingError};
/// use dashboard_lib::model::{FromJson, map_records};
///
/// struct Invoice {
///     number: String,
/// }
///
/// impl FromJson for Invoice {
///     fn from_json(value: &serde_json::Value) -> Result<Self, MappingError> {
///         let number = value
///             .get("number")
///             .and_then(|v| v.as_str())
///             .ok_or_else(|| FieldError::missing("number"))?;
///         Ok(Invoice { number: number.to_string() })
///     }
/// }
///
/// let payload = serde_json::json!([{"number": "INV-1"}, {"number": "INV-2"}]);
/// let invoices: Vec<Invoice> = map_records(&payload).unwrap();
/// assert_eq!(invoices[1].number, "INV-2");
/// ```
pub trait FromJson: Sized {
    /// Maps one JSON value into `Self`.
    fn from_json(value: &serde_json::Value) -> Result<Self, MappingError>;
}

impl FromJson for Record {
    fn from_json(value: &serde_json::Value) -> Result<Self, MappingError> {
        let serde_json::Value::Object(map) = value else {
            return Err(MappingError::ExpectedObject(MappingError::json_type_name(
                value,
            )));
        };

        let mut record = Record::new();
        for (key, json) in map {
            if key == ID_FIELD {
                record.id = id_from_json(json);
            }
            record.fields.insert(key.clone(), Value::from_json(json.clone()));
        }
        Ok(record)
    }
}

/// Maps a record collection into row values.
///
/// Accepts an array of records or an object whose values are records (kept
/// in document order). Any other payload is a [`MappingError::ExpectedCollection`].
pub fn map_records<T: FromJson>(payload: &serde_json::Value) -> Result<Vec<T>, MappingError> {
    match payload {
        serde_json::Value::Array(items) => items.iter().map(T::from_json).collect(),
        serde_json::Value::Object(entries) => entries
            .iter()
            .map(|(key, item)| match item {
                serde_json::Value::Object(fields) if !fields.contains_key(ID_FIELD) => {
                    let mut fields = fields.clone();
                    fields.insert(ID_FIELD.to_string(), serde_json::Value::String(key.clone()));
                    T::from_json(&serde_json::Value::Object(fields))
                }
                _ => T::from_json(item),
            })
            .collect(),
        other => Err(MappingError::ExpectedCollection(
            MappingError::json_type_name(other),
        )),
    }
}

/// Parses a JSON document and maps it with [`map_records`].
pub fn parse_records<T: FromJson>(text: &str) -> Result<Vec<T>, MappingError> {
    let payload: serde_json::Value = serde_json::from_str(text)?;
    map_records(&payload)
}

fn id_from_json(json: &serde_json::Value) -> Option<String> {
    match json {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Value {
    /// Converts a `serde_json::Value` into a field value.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Value::Int(small),
                        Err(_) => Value::Long(i),
                    }
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Json(serde_json::Value::Number(n))
                }
            }
            serde_json::Value::String(s) => {
                // Plain calendar date
                if s.len() == 10
                    && let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                {
                    Value::Date(date)
                }
                // ISO 8601 timestamp
                else if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                    Value::DateTime(dt)
                } else {
                    Value::String(s)
                }
            }
            other => Value::Json(other),
        }
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Sorted keys keep CLI output stable
        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();

        let mut map = serializer.serialize_map(Some(keys.len()))?;
        for key in keys {
            map.serialize_entry(key, &self.fields[key])?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a dashboard record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let json: serde_json::Value = map.next_value()?;
            if key == ID_FIELD {
                record.id = id_from_json(&json);
            }
            record.fields.insert(key, Value::from_json(json));
        }

        Ok(record)
    }
}
