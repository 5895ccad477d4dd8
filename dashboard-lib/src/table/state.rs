//! Table state and its transition function.
//!
//! Every change to sort, filter, pagination or column visibility goes
//! through [`reduce`], a pure `(state, action) -> state` function, so the
//! rules can be tested without any UI around them.

use std::collections::BTreeSet;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use super::Column;
use super::FilterState;
use super::PaginationState;
use super::SortState;
use super::next_sort;

/// Everything the user can change about a table view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub sort: Option<SortState>,
    pub filter: FilterState,
    pub pagination: PaginationState,
    /// Keys of columns toggled out of view.
    pub hidden_columns: BTreeSet<String>,
}

impl TableState {
    /// Returns `true` if the column with `key` is hidden.
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden_columns.contains(key)
    }
}

/// A user interaction or programmatic change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// A header was clicked: cycles the sort on that column.
    HeaderClicked(String),
    /// Replace the sort outright.
    SetSort(Option<SortState>),
    /// Update the search text.
    SetFilterQuery(String),
    /// Retarget the search box to another column (or none).
    SetFilterColumn(Option<String>),
    SetPageIndex(usize),
    SetPageSize(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    /// Show or hide a hideable column.
    ToggleColumn(String),
}

/// Applies `action` to `state`.
///
/// `columns` decides which keys are sortable and hideable; `page_count` is
/// the number of pages under the current state and bounds navigation.
///
/// - header clicks cycle the sort (see [`next_sort`]); unknown or
///   non-sortable columns are ignored;
/// - a new filter query, filter column or page size returns to the first
///   page; a new filter column also clears the query;
/// - navigation never leaves `0..page_count`, so moving past either end is a
///   no-op.
pub fn reduce<R>(
    state: &TableState,
    action: &TableAction,
    columns: &[Column<R>],
    page_count: usize,
) -> TableState {
    let mut next = state.clone();
    let column = |key: &str| columns.iter().find(|c| c.key() == Some(key));
    let last_page = page_count.saturating_sub(1);

    match action {
        TableAction::HeaderClicked(key) => {
            if column(key.as_str()).is_some_and(|c| c.sortable) {
                next.sort = next_sort(state.sort.as_ref(), key);
            }
        }
        TableAction::SetSort(sort) => match sort {
            Some(sort) if !column(sort.column.as_str()).is_some_and(|c| c.sortable) => {
                debug!("Ignoring sort on non-sortable column '{}'", sort.column);
            }
            _ => next.sort = sort.clone(),
        },
        TableAction::SetFilterQuery(query) => {
            if *query != state.filter.query {
                next.filter.query = query.clone();
                next.pagination.page_index = 0;
            }
        }
        TableAction::SetFilterColumn(target) => {
            if *target != state.filter.column {
                if let Some(key) = target
                    && column(key.as_str()).is_none()
                {
                    debug!("Ignoring filter on unknown column '{}'", key);
                    return next;
                }
                next.filter = FilterState {
                    column: target.clone(),
                    query: String::new(),
                };
                next.pagination.page_index = 0;
            }
        }
        TableAction::SetPageIndex(index) => {
            next.pagination.page_index = (*index).min(last_page);
        }
        TableAction::SetPageSize(size) => {
            let size = (*size).max(1);
            if size != state.pagination.page_size {
                next.pagination = PaginationState::new(0, size);
            }
        }
        TableAction::NextPage => {
            if state.pagination.can_go_next(page_count) {
                next.pagination.page_index += 1;
            }
        }
        TableAction::PreviousPage => {
            if state.pagination.can_go_prev() {
                next.pagination.page_index = state.pagination.page_index.min(last_page + 1) - 1;
            }
        }
        TableAction::FirstPage => next.pagination.page_index = 0,
        TableAction::LastPage => next.pagination.page_index = last_page,
        TableAction::ToggleColumn(key) => {
            let hideable = column(key.as_str()).is_some_and(|c| c.hideable);
            if hideable && !next.hidden_columns.remove(key) {
                next.hidden_columns.insert(key.clone());
            }
        }
    }

    next
}
