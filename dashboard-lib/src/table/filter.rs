//! Free-text filter bound to one column.

use serde::Deserialize;
use serde::Serialize;

use super::TableRow;

/// A substring filter on a single column.
///
/// Matching is case-insensitive containment against the stringified raw
/// field value. A row without the field matches only the empty query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Key of the column the query applies to.
    pub column: Option<String>,
    /// The search text as typed.
    pub query: String,
}

impl FilterState {
    /// Creates a filter state bound to `column` with an empty query.
    pub fn on(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            query: String::new(),
        }
    }

    /// Returns `true` if the filter excludes anything.
    pub fn is_active(&self) -> bool {
        self.column.is_some() && !self.query.is_empty()
    }

    /// Builds the predicate for this filter, or `None` when inactive.
    pub fn predicate(&self) -> Option<FilterPredicate<'_>> {
        let column = self.column.as_deref()?;
        if self.query.is_empty() {
            return None;
        }
        Some(FilterPredicate {
            column,
            needle: self.query.to_lowercase(),
        })
    }
}

/// A prepared filter: the column and the lowercased query.
#[derive(Debug, Clone)]
pub struct FilterPredicate<'a> {
    column: &'a str,
    needle: String,
}

impl FilterPredicate<'_> {
    /// Returns `true` if `row` passes the filter.
    pub fn matches<R: TableRow>(&self, row: &R) -> bool {
        let haystack = row
            .field(self.column)
            .map(|value| value.to_text())
            .unwrap_or_default();
        haystack.to_lowercase().contains(&self.needle)
    }
}
