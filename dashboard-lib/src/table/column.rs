//! Column descriptors and cell values.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::TableRow;
use crate::error::TableConfigError;
use crate::model::Badge;
use crate::model::Value;

/// A cell produced for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// The row has no value for this column.
    Empty,
    /// The raw field value, shown as is.
    Value(Value),
    /// Text computed by a renderer.
    Text(String),
    /// A status badge.
    Badge(Badge),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(text.into())
    }

    /// Creates a badge cell for a backend status string.
    pub fn badge(status: &str) -> Self {
        Cell::Badge(Badge::for_status(status))
    }

    /// Returns the plain-text form of the cell.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Value(value) => value.to_text(),
            Cell::Text(text) => text.clone(),
            Cell::Badge(badge) => badge.label.clone(),
        }
    }
}

/// Function computing a cell from a row and its column.
pub type Renderer<R> = Arc<dyn Fn(&R, &Column<R>) -> Cell + Send + Sync>;

/// Column configuration.
///
/// A column reads the field named by `key` from each row. A `renderer`
/// replaces the raw value for display only; sorting and filtering always use
/// the raw field.
///
/// # Examples
///
/// ```
/// use dashboard_lib::model::Record;
/// use dashboard_lib::table::{Cell, Column};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("patient", "Patient"),
///     Column::new("status", "Status")
///         .render_with(|row: &Record, _| Cell::badge(row.get_string("status").ok().flatten().unwrap_or(""))),
///     Column::computed("Actions", |_: &Record, _| Cell::text("edit")),
/// ];
/// assert!(columns[0].sortable);
/// assert!(!columns[2].sortable);
/// ```
pub struct Column<R> {
    /// Field key read from each row. `None` for computed/action columns.
    pub key: Option<String>,
    /// Header text, already localized by the caller.
    pub title: String,
    /// Optional display renderer.
    pub renderer: Option<Renderer<R>>,
    /// Whether header interaction sorts by this column.
    pub sortable: bool,
    /// Whether the column may be toggled out of view.
    pub hideable: bool,
}

impl<R> Column<R> {
    /// Create a keyed column. Keyed columns are sortable and hideable.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            title: title.into(),
            renderer: None,
            sortable: true,
            hideable: true,
        }
    }

    /// Create a computed column with no key. Computed columns cannot be
    /// sorted.
    pub fn computed(
        title: impl Into<String>,
        renderer: impl Fn(&R, &Column<R>) -> Cell + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: None,
            title: title.into(),
            renderer: Some(Arc::new(renderer)),
            sortable: false,
            hideable: true,
        }
    }

    /// Set the display renderer.
    pub fn render_with(
        mut self,
        renderer: impl Fn(&R, &Column<R>) -> Cell + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Set whether the column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set whether the column can be hidden.
    pub fn hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    /// Returns the column key.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the header label: the translation for this key if one exists,
    /// the static title otherwise.
    pub fn label<'a>(&'a self, translations: &'a HashMap<String, String>) -> &'a str {
        self.key
            .as_ref()
            .and_then(|key| translations.get(key))
            .map(String::as_str)
            .unwrap_or(&self.title)
    }
}

impl<R: TableRow + 'static> Column<R> {
    /// Create a keyed column that shows its raw value as a status badge.
    ///
    /// Missing and null values render as [`Cell::Empty`].
    pub fn status(key: impl Into<String>, title: impl Into<String>) -> Self {
        Column::new(key, title).render_with(|row: &R, column: &Column<R>| {
            column
                .key()
                .and_then(|key| row.field(key))
                .filter(|value| !value.is_null())
                .map(|value| Cell::badge(&value.to_text()))
                .unwrap_or(Cell::Empty)
        })
    }
}

impl<R: TableRow> Column<R> {
    /// Computes the display cell for `row`.
    pub fn cell(&self, row: &R) -> Cell {
        if let Some(renderer) = &self.renderer {
            return renderer(row, self);
        }
        self.key
            .as_deref()
            .and_then(|key| row.field(key))
            .map(|value| Cell::Value(value.into_owned()))
            .unwrap_or(Cell::Empty)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            renderer: self.renderer.clone(),
            sortable: self.sortable,
            hideable: self.hideable,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("renderer", &self.renderer.as_ref().map(|_| "<fn>"))
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .finish()
    }
}

/// Checks a column set for configuration errors.
///
/// Rejects decorative columns (no key and no renderer), sortable columns
/// without a key, and duplicate keys.
pub fn validate_columns<R>(columns: &[Column<R>]) -> Result<(), TableConfigError> {
    let mut seen = HashSet::new();
    for (index, column) in columns.iter().enumerate() {
        match column.key.as_deref() {
            None if column.renderer.is_none() => {
                return Err(TableConfigError::DecorativeColumn { index });
            }
            None if column.sortable => {
                return Err(TableConfigError::SortableWithoutKey { index });
            }
            None => {}
            Some(key) => {
                if !seen.insert(key) {
                    return Err(TableConfigError::DuplicateKey(key.to_string()));
                }
            }
        }
    }
    Ok(())
}
