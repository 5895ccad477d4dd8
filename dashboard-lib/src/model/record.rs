//! Dynamic dashboard record

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal::Decimal;

use super::Value;
use crate::error::FieldError;
use crate::table::TableRow;

/// A dynamic record fetched from the dashboard backend.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing any
/// backend payload (appointments, invoices, log entries, ...) to flow into the
/// table engine without a dedicated struct. Typed getter methods provide safe
/// access with proper error handling.
///
/// # Example
///
/// ```
/// use dashboard_lib::model::Record;
///
/// let record = Record::new()
///     .set("patient", "Ana Souza")
///     .set("duration", 30);
///
/// assert_eq!(record.get_string("patient").unwrap(), Some("Ana Souza"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// The backend identifier of the record, if it has one.
    pub(crate) id: Option<String>,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record with the given ID.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fields: HashMap::new(),
        }
    }

    // =========================================================================
    // Metadata accessors
    // =========================================================================

    /// Returns the record ID, if set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sets the record ID.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns a mutable reference to all fields.
    pub fn fields_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an i32 field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i32>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets an i64 field value.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Long(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(i64::from(*n))), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "long", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(f64::from(*n))),
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a Decimal field value.
    ///
    /// Integers widen losslessly; floats are rejected because the backend
    /// sends money as strings or integers of cents.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Decimal(d)) => Ok(Some(*d)),
            Some(Value::Int(n)) => Ok(Some(Decimal::from(*n))),
            Some(Value::Long(n)) => Ok(Some(Decimal::from(*n))),
            Some(other) => Err(FieldError::type_mismatch(field, "decimal", other.type_name())),
        }
    }

    /// Gets a calendar date field value.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(Value::DateTime(dt)) => Ok(Some(dt.date_naive())),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }

    /// Gets a DateTime field value, converted to UTC.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(dt.with_timezone(&Utc))),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "datetime",
                other.type_name(),
            )),
        }
    }
}

impl TableRow for Record {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.fields.get(key).map(Cow::Borrowed)
    }

    fn row_id(&self) -> Option<String> {
        self.id.clone()
    }
}
