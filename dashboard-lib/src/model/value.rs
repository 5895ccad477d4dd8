//! Value enum for dynamic field values

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::SecondsFormat;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// A dynamic value that can hold any field the dashboard backend returns.
///
/// Records coming from the webhook backend are loosely typed; this enum is
/// the boundary type that the table engine sorts, filters and displays.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true / false | `Bool` |
/// | integer fitting i32 | `Int` |
/// | other integer | `Long` |
/// | fractional number | `Float` |
/// | `"YYYY-MM-DD"` | `Date` |
/// | RFC 3339 timestamp | `DateTime` |
/// | other string | `String` |
/// | array / object | `Json` |
///
/// Values are built from JSON through [`Value::from_json`]. `Decimal` never
/// comes out of that mapping; callers build it for money amounts (invoice
/// totals, payments) where float rounding is unacceptable.
///
/// # Example
///
/// ```
/// use dashboard_lib::model::Value;
///
/// let name = Value::from("Consultation");
/// let amount = Value::from(120i64);
/// let paid = Value::from(true);
/// let empty = Value::Null;
/// assert_eq!(amount.to_text(), "120");
/// assert_eq!(empty.to_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// Calendar date without time.
    Date(NaiveDate),
    /// Date and time with the offset the backend sent.
    DateTime(DateTime<FixedOffset>),
    /// String value.
    String(String),
    /// Fallback for nested JSON values.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
            Value::Json(_) => "json",
        }
    }

    /// Returns the numeric value, if this is a number.
    ///
    /// Strings are not parsed here; see [`crate::table::compare_values`] for
    /// the numeric-looking string policy used when sorting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    /// Stringifies the value for display and substring filtering.
    ///
    /// `Null` becomes the empty string, dates are `YYYY-MM-DD`, date-times
    /// are RFC 3339 in their own offset (`Z` for UTC) with any fractional
    /// seconds kept, and JSON is compact.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::String(s) => s.clone(),
            Value::Json(json) => json.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v.fixed_offset())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::from(false).to_text(), "false");
        assert_eq!(Value::from(2.5).to_text(), "2.5");
        assert_eq!(
            Value::from(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()).to_text(),
            "2024-01-08"
        );
        assert_eq!(
            Value::from(Decimal::from_str("19.90").unwrap()).to_text(),
            "19.90"
        );
        assert_eq!(
            Value::from(serde_json::json!({"a": 1})).to_text(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_datetime_text_keeps_offset() {
        let zoned = DateTime::parse_from_rfc3339("2024-01-10T10:00:00+02:00").unwrap();
        assert_eq!(Value::from(zoned).to_text(), "2024-01-10T10:00:00+02:00");

        let fractional = DateTime::parse_from_rfc3339("2024-01-10T10:00:00.250Z").unwrap();
        assert_eq!(Value::from(fractional).to_text(), "2024-01-10T10:00:00.250Z");

        let utc = fractional.with_timezone(&Utc);
        assert_eq!(Value::from(utc).to_text(), "2024-01-10T10:00:00.250Z");
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::from(3i32).as_f64(), Some(3.0));
        assert_eq!(Value::from(Decimal::from_str("1.5").unwrap()).as_f64(), Some(1.5));
        assert_eq!(Value::from("3").as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    }
}
