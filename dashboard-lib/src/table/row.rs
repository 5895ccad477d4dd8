//! The row abstraction the engine reads fields through.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::model::Value;

/// Trait for records that can be displayed as rows in a table.
///
/// The engine only ever reads raw field values by column key: sorting and
/// filtering use [`TableRow::field`], never the rendered cell.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use dashboard_lib::model::Value;
/// use dashboard_lib::table::TableRow;
///
/// struct Payment {
///     id: u32,
///     method: String,
///     amount: f64,
/// }
///
/// impl TableRow for Payment {
///     fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
///         match key {
///             "method" => Some(Cow::Owned(Value::from(self.method.as_str()))),
///             "amount" => Some(Cow::Owned(Value::from(self.amount))),
///             _ => None,
///         }
///     }
///
///     fn row_id(&self) -> Option<String> {
///         Some(self.id.to_string())
///     }
/// }
/// ```
pub trait TableRow {
    /// Returns the raw value stored under `key`, or `None` if the row has no
    /// such field.
    fn field(&self, key: &str) -> Option<Cow<'_, Value>>;

    /// Stable identifier of the row, if it has one.
    fn row_id(&self) -> Option<String> {
        None
    }
}

impl TableRow for HashMap<String, Value> {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl<T: TableRow + ?Sized> TableRow for &T {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        (**self).field(key)
    }

    fn row_id(&self) -> Option<String> {
        (**self).row_id()
    }
}
