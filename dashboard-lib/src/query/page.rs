//! Page type for server-paginated results.

use crate::error::MappingError;
use crate::model::FromJson;
use crate::model::map_records;
use crate::table::page_count;

/// Envelope keys the backend uses for the rows of a page.
const DATA_KEYS: [&str; 3] = ["data", "records", "items"];

/// Envelope keys the backend uses for the total row count.
const TOTAL_KEYS: [&str; 3] = ["total", "total_count", "count"];

/// One page of rows fetched from the backend.
///
/// In manual pagination mode the table engine holds exactly one of these at
/// a time; [`Page::page_count`] feeds
/// [`TableEngine::set_page_count`](crate::table::TableEngine::set_page_count).
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    records: Vec<R>,
    /// Total row count across all pages, if the backend reported it.
    total_count: Option<usize>,
}

impl<R> Page<R> {
    /// Creates a page without a total count.
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            total_count: None,
        }
    }

    /// Sets the total row count.
    pub fn with_total_count(mut self, count: usize) -> Self {
        self.total_count = Some(count);
        self
    }

    /// Returns a reference to the rows in this page.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Consumes the page and returns the rows.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Returns the total row count, if the backend reported it.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Number of pages of `page_size` rows, if the total is known.
    pub fn page_count(&self, page_size: usize) -> Option<usize> {
        self.total_count.map(|total| page_count(total, page_size))
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl<R: FromJson> Page<R> {
    /// Maps a backend response into a page.
    ///
    /// Accepts a bare record collection, or an envelope object holding the
    /// rows under `data`, `records` or `items` and the total under `total`,
    /// `total_count` or `count`.
    pub fn from_json(payload: &serde_json::Value) -> Result<Self, MappingError> {
        let serde_json::Value::Object(envelope) = payload else {
            return Ok(Page::new(map_records(payload)?));
        };

        let Some(rows) = DATA_KEYS.iter().find_map(|key| envelope.get(*key)) else {
            return Ok(Page::new(map_records(payload)?));
        };

        let page = Page::new(map_records(rows)?);
        let total = TOTAL_KEYS
            .iter()
            .find_map(|key| envelope.get(*key))
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| usize::try_from(n).ok());

        Ok(match total {
            Some(total) => page.with_total_count(total),
            None => page,
        })
    }
}
