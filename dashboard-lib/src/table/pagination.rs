//! Pagination state and page math.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationState {
    /// 0-based page index.
    pub page_index: usize,
    /// Rows per page, never zero.
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    /// Creates a pagination state; a zero page size becomes 1.
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// Returns this state with a zero page size raised to 1.
    ///
    /// The fields are public, so states built by hand or deserialized may
    /// skip [`PaginationState::new`].
    pub fn normalized(self) -> Self {
        Self::new(self.page_index, self.page_size)
    }

    /// Returns this state with `page_index` moved onto the last valid page.
    ///
    /// With no pages at all the index is 0.
    pub fn clamped(self, page_count: usize) -> Self {
        Self {
            page_index: self.page_index.min(page_count.saturating_sub(1)),
            ..self
        }
    }

    /// Returns `true` if a next page exists.
    pub fn can_go_next(&self, page_count: usize) -> bool {
        self.page_index + 1 < page_count
    }

    /// Returns `true` if a previous page exists.
    pub fn can_go_prev(&self) -> bool {
        self.page_index > 0
    }

    /// Row range of the current page within `total` rows.
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }
}

/// Who owns page boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaginationMode {
    /// All rows are local; the engine slices pages itself.
    #[default]
    Client,
    /// The caller fetches one page at a time and reports the page count.
    /// The engine never slices rows in this mode.
    Manual { page_count: usize },
}

impl PaginationMode {
    /// Returns `true` for manual (server-driven) pagination.
    pub fn is_manual(&self) -> bool {
        matches!(self, PaginationMode::Manual { .. })
    }
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}
