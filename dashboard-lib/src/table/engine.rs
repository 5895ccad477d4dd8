//! The table engine: columns, rows, state and hooks in one place.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::Cell;
use super::Column;
use super::Direction;
use super::FilterState;
use super::PaginationMode;
use super::PaginationState;
use super::SortState;
use super::TableAction;
use super::TableRow;
use super::TableState;
use super::page_count;
use super::reduce;
use super::sort_indices;
use super::validate_columns;
use crate::error::TableConfigError;

// =============================================================================
// Options
// =============================================================================

/// Setup options for a [`TableEngine`].
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Key of the column the search box filters on.
    pub filter_column: Option<String>,
    /// Initial page position and size.
    pub pagination: PaginationState,
    pub mode: PaginationMode,
    /// Header label overrides keyed by column key.
    pub column_translations: HashMap<String, String>,
    /// A refresh is in flight; the refresh control is disabled.
    pub refreshing: bool,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter column.
    pub fn with_filter_column(mut self, key: impl Into<String>) -> Self {
        self.filter_column = Some(key.into());
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination = PaginationState::new(self.pagination.page_index, page_size);
        self
    }

    /// Sets the initial pagination state.
    pub fn with_pagination(mut self, pagination: PaginationState) -> Self {
        self.pagination = PaginationState::new(pagination.page_index, pagination.page_size);
        self
    }

    /// Switches to manual pagination with the given page count.
    pub fn with_manual_pagination(mut self, page_count: usize) -> Self {
        self.mode = PaginationMode::Manual { page_count };
        self
    }

    /// Adds a header label override.
    pub fn with_translation(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.column_translations.insert(key.into(), label.into());
        self
    }

    pub fn with_refreshing(mut self, refreshing: bool) -> Self {
        self.refreshing = refreshing;
        self
    }
}

// =============================================================================
// Hooks
// =============================================================================

type Hook = Box<dyn FnMut() + Send>;

/// Callbacks the engine forwards user intent to.
///
/// Hooks carry no engine state: they are told what happened and decide what
/// to do about it (fetch the next server page, open a dialog, ...).
pub struct TableHooks<R> {
    on_pagination_change: Option<Box<dyn FnMut(PaginationState) + Send>>,
    on_refresh: Option<Hook>,
    on_create: Option<Hook>,
    on_row_select: Option<Box<dyn FnMut(&R) + Send>>,
}

impl<R> Default for TableHooks<R> {
    fn default() -> Self {
        Self {
            on_pagination_change: None,
            on_refresh: None,
            on_create: None,
            on_row_select: None,
        }
    }
}

impl<R> TableHooks<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per change of page index or page size.
    pub fn on_pagination_change(
        mut self,
        hook: impl FnMut(PaginationState) + Send + 'static,
    ) -> Self {
        self.on_pagination_change = Some(Box::new(hook));
        self
    }

    /// Called by [`TableEngine::refresh`]. Enables the refresh control.
    pub fn on_refresh(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_refresh = Some(Box::new(hook));
        self
    }

    /// Called by [`TableEngine::create`]. Enables the create control.
    pub fn on_create(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_create = Some(Box::new(hook));
        self
    }

    /// Called by [`TableEngine::select_row`] with the selected row.
    pub fn on_row_select(mut self, hook: impl FnMut(&R) + Send + 'static) -> Self {
        self.on_row_select = Some(Box::new(hook));
        self
    }
}

impl<R> fmt::Debug for TableHooks<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableHooks")
            .field("on_pagination_change", &self.on_pagination_change.is_some())
            .field("on_refresh", &self.on_refresh.is_some())
            .field("on_create", &self.on_create.is_some())
            .field("on_row_select", &self.on_row_select.is_some())
            .finish()
    }
}

// =============================================================================
// View
// =============================================================================

/// A header as the UI should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView<'a> {
    pub key: Option<&'a str>,
    /// Translated label, or the column title.
    pub label: &'a str,
    pub sortable: bool,
    /// Direction if the table is sorted on this column.
    pub sorted: Option<Direction>,
    pub hideable: bool,
}

/// Snapshot of what the table shows right now.
#[derive(Debug)]
pub struct TableView<'a, R> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a R>,
    pub page_index: usize,
    pub page_count: usize,
    /// Rows passing the filter, across all pages.
    pub total_rows: usize,
    pub sort: Option<&'a SortState>,
    pub can_go_next: bool,
    pub can_go_prev: bool,
    /// Visible columns only.
    pub headers: Vec<HeaderView<'a>>,
    /// Nothing to show; the UI draws its empty placeholder.
    pub is_empty: bool,
    pub refresh_enabled: bool,
    pub create_enabled: bool,
}

// =============================================================================
// Engine
// =============================================================================

/// Client-side sorting, filtering and pagination over a set of rows.
///
/// In [`PaginationMode::Client`] the engine owns all rows and slices pages
/// itself. In [`PaginationMode::Manual`] the caller holds one server page at a
/// time: the engine still filters and sorts what it has, never slices it, and
/// reports page changes through [`TableHooks::on_pagination_change`] so the
/// caller can fetch the next page.
///
/// # Example
///
/// ```
/// use dashboard_lib::model::Record;
/// use dashboard_lib::table::{Column, TableAction, TableEngine, TableOptions};
///
/// let columns = vec![Column::new("name", "Name"), Column::new("total", "Total")];
/// let data = vec![
///     Record::new().set("name", "Bruno").set("total", 20),
///     Record::new().set("name", "Ana").set("total", 35),
/// ];
///
/// let mut engine = TableEngine::new(columns, data, TableOptions::new()).unwrap();
/// engine.dispatch(TableAction::HeaderClicked("name".into()));
///
/// let view = engine.view();
/// assert_eq!(view.rows[0].get_string("name").unwrap(), Some("Ana"));
/// ```
pub struct TableEngine<R> {
    columns: Vec<Column<R>>,
    data: Vec<R>,
    state: TableState,
    mode: PaginationMode,
    translations: HashMap<String, String>,
    refreshing: bool,
    hooks: TableHooks<R>,

    /// Indices into `data` passing the filter, in sorted order.
    order: Vec<usize>,
}

impl<R: TableRow> TableEngine<R> {
    /// Creates an engine after validating the column set and filter column.
    pub fn new(
        columns: Vec<Column<R>>,
        data: Vec<R>,
        options: TableOptions,
    ) -> Result<Self, TableConfigError> {
        validate_columns(&columns)?;

        if let Some(key) = &options.filter_column
            && !columns.iter().any(|c| c.key() == Some(key.as_str()))
        {
            return Err(TableConfigError::UnknownFilterColumn(key.clone()));
        }

        let mut engine = Self {
            columns,
            data,
            state: TableState {
                filter: FilterState {
                    column: options.filter_column,
                    query: String::new(),
                },
                pagination: options.pagination.normalized(),
                ..TableState::default()
            },
            mode: options.mode,
            translations: options.column_translations,
            refreshing: options.refreshing,
            hooks: TableHooks::default(),
            order: Vec::new(),
        };
        engine.rebuild();
        engine.clamp();
        Ok(engine)
    }

    /// Attaches hooks (builder pattern).
    pub fn with_hooks(mut self, hooks: TableHooks<R>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replaces the hooks.
    pub fn set_hooks(&mut self, hooks: TableHooks<R>) {
        self.hooks = hooks;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// All rows as supplied, unsorted and unfiltered.
    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Number of pages under the current state.
    pub fn page_count(&self) -> usize {
        match self.mode {
            PaginationMode::Client => page_count(self.order.len(), self.state.pagination.page_size),
            PaginationMode::Manual { page_count } => page_count,
        }
    }

    /// Columns not toggled out of view.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns
            .iter()
            .filter(|c| c.key().is_none_or(|key| !self.state.is_hidden(key)))
    }

    // =========================================================================
    // State changes
    // =========================================================================

    /// Applies a user action. Returns `true` if anything changed.
    pub fn dispatch(&mut self, action: TableAction) -> bool {
        let next = reduce(&self.state, &action, &self.columns, self.page_count());
        if next == self.state {
            return false;
        }

        let previous = std::mem::replace(&mut self.state, next);
        if previous.sort != self.state.sort || previous.filter != self.state.filter {
            self.rebuild();
        }
        self.clamp();

        debug!("Table action {:?} applied", action);
        if previous.pagination != self.state.pagination {
            self.notify_pagination();
        }
        true
    }

    /// Replaces the rows. Sort, filter and hidden columns are kept and
    /// re-applied; the page index is clamped.
    pub fn set_data(&mut self, data: Vec<R>) {
        self.data = data;
        self.rebuild();

        let before = self.state.pagination;
        self.clamp();
        if before != self.state.pagination {
            self.notify_pagination();
        }
    }

    /// Updates the server page count. Ignored in client mode.
    pub fn set_page_count(&mut self, page_count: usize) {
        let PaginationMode::Manual { page_count: current } = &mut self.mode else {
            debug!("Ignoring page count {} in client pagination mode", page_count);
            return;
        };
        *current = page_count;

        let before = self.state.pagination;
        self.clamp();
        if before != self.state.pagination {
            self.notify_pagination();
        }
    }

    pub fn set_refreshing(&mut self, refreshing: bool) {
        self.refreshing = refreshing;
    }

    pub fn set_column_translations(&mut self, translations: HashMap<String, String>) {
        self.translations = translations;
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Indices into `data` of the rows on the current page.
    fn page_indices(&self) -> &[usize] {
        match self.mode {
            PaginationMode::Client => &self.order[self.state.pagination.window(self.order.len())],
            PaginationMode::Manual { .. } => &self.order,
        }
    }

    /// Builds the current view.
    pub fn view(&self) -> TableView<'_, R> {
        let rows: Vec<&R> = self.page_indices().iter().map(|&i| &self.data[i]).collect();
        let page_count = self.page_count();
        let sort = self.state.sort.as_ref();

        let headers = self
            .visible_columns()
            .map(|column| HeaderView {
                key: column.key(),
                label: column.label(&self.translations),
                sortable: column.sortable,
                sorted: sort
                    .filter(|s| column.key() == Some(s.column.as_str()))
                    .map(|s| s.direction),
                hideable: column.hideable,
            })
            .collect();

        TableView {
            is_empty: rows.is_empty(),
            rows,
            page_index: self.state.pagination.page_index,
            page_count,
            total_rows: self.order.len(),
            sort,
            can_go_next: self.state.pagination.can_go_next(page_count),
            can_go_prev: self.state.pagination.can_go_prev(),
            headers,
            refresh_enabled: self.hooks.on_refresh.is_some() && !self.refreshing,
            create_enabled: self.hooks.on_create.is_some(),
        }
    }

    /// Display cells of `row` for the visible columns.
    pub fn cells(&self, row: &R) -> Vec<Cell> {
        self.visible_columns().map(|column| column.cell(row)).collect()
    }

    // =========================================================================
    // Pass-through hooks
    // =========================================================================

    /// Asks the caller to reload. Returns `false` while a refresh is in
    /// flight or when no refresh hook is set.
    pub fn refresh(&mut self) -> bool {
        if self.refreshing {
            return false;
        }
        match self.hooks.on_refresh.as_mut() {
            Some(hook) => {
                hook();
                true
            }
            None => false,
        }
    }

    /// Asks the caller to open its create form.
    pub fn create(&mut self) -> bool {
        match self.hooks.on_create.as_mut() {
            Some(hook) => {
                hook();
                true
            }
            None => false,
        }
    }

    /// Reports the row at `index_in_page` of the current page as selected.
    pub fn select_row(&mut self, index_in_page: usize) -> bool {
        let Some(&index) = self.page_indices().get(index_in_page) else {
            return false;
        };
        match self.hooks.on_row_select.as_mut() {
            Some(hook) => {
                hook(&self.data[index]);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn rebuild(&mut self) {
        let predicate = self.state.filter.predicate();
        let mut order: Vec<usize> = self
            .data
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate.as_ref().is_none_or(|p| p.matches(*row)))
            .map(|(index, _)| index)
            .collect();

        if let Some(sort) = &self.state.sort {
            sort_indices(&mut order, &self.data, sort);
        }
        self.order = order;
    }

    fn clamp(&mut self) {
        self.state.pagination = self.state.pagination.clamped(self.page_count());
    }

    fn notify_pagination(&mut self) {
        let pagination = self.state.pagination;
        debug!(
            "Pagination changed to page {} (size {})",
            pagination.page_index, pagination.page_size
        );
        if let Some(hook) = self.hooks.on_pagination_change.as_mut() {
            hook(pagination);
        }
    }
}

impl<R> fmt::Debug for TableEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableEngine")
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("refreshing", &self.refreshing)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
