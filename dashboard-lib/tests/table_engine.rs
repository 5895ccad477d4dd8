//! Table engine behavior through its public surface.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use dashboard_lib::model::Record;
use dashboard_lib::model::parse_records;
use dashboard_lib::table::Cell;
use dashboard_lib::table::Column;
use dashboard_lib::table::Direction;
use dashboard_lib::table::PaginationState;
use dashboard_lib::table::SortState;
use dashboard_lib::table::TableAction;
use dashboard_lib::table::TableEngine;
use dashboard_lib::table::TableHooks;
use dashboard_lib::table::TableOptions;
use dashboard_lib::table::TableView;
use pretty_assertions::assert_eq;

const INVOICES: &str = r#"[
    {"id": "inv-1", "customer": "Carla", "total": "120", "status": "paid"},
    {"id": "inv-2", "customer": "ana", "total": 80, "status": "pending"},
    {"id": "inv-3", "customer": "Bruno", "total": null, "status": "overdue"},
    {"id": "inv-4", "customer": "Ana Paula", "total": 9.5, "status": "paid"},
    {"id": "inv-5", "customer": "Diego", "total": "", "status": "cancelled"}
]"#;

fn invoices() -> Vec<Record> {
    parse_records(INVOICES).unwrap()
}

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("customer", "Customer"),
        Column::new("total", "Total"),
        Column::new("status", "Status").render_with(|row: &Record, column| {
            let key = column.key().unwrap_or_default();
            match row.get_string(key) {
                Ok(Some(status)) => Cell::badge(status),
                _ => Cell::Empty,
            }
        }),
        Column::computed("", |row: &Record, _| {
            Cell::text(format!("open {}", row.id().unwrap_or_default()))
        }),
    ]
}

fn ids(view: &TableView<'_, Record>) -> Vec<String> {
    view.rows
        .iter()
        .map(|row| row.id().unwrap_or_default().to_string())
        .collect()
}

fn engine(options: TableOptions) -> TableEngine<Record> {
    TableEngine::new(columns(), invoices(), options).unwrap()
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_three_clicks_cycle_sort() {
    let mut engine = engine(TableOptions::new());
    let click = TableAction::HeaderClicked("customer".into());

    engine.dispatch(click.clone());
    assert_eq!(engine.view().sort, Some(&SortState::ascending("customer")));
    assert_eq!(ids(&engine.view()), ["inv-4", "inv-3", "inv-1", "inv-5", "inv-2"]);

    engine.dispatch(click.clone());
    assert_eq!(engine.view().sort, Some(&SortState::descending("customer")));
    assert_eq!(ids(&engine.view()), ["inv-2", "inv-5", "inv-1", "inv-3", "inv-4"]);

    engine.dispatch(click);
    assert_eq!(engine.view().sort, None);
    assert_eq!(ids(&engine.view()), ["inv-1", "inv-2", "inv-3", "inv-4", "inv-5"]);
}

#[test]
fn test_mixed_totals_sort_blanks_then_numbers() {
    let mut engine = engine(TableOptions::new());
    engine.dispatch(TableAction::HeaderClicked("total".into()));
    assert_eq!(ids(&engine.view()), ["inv-3", "inv-5", "inv-4", "inv-2", "inv-1"]);

    engine.dispatch(TableAction::HeaderClicked("total".into()));
    assert_eq!(ids(&engine.view()), ["inv-1", "inv-2", "inv-4", "inv-3", "inv-5"]);
}

#[test]
fn test_clicking_another_column_restarts_ascending() {
    let mut engine = engine(TableOptions::new());
    engine.dispatch(TableAction::HeaderClicked("customer".into()));
    engine.dispatch(TableAction::HeaderClicked("customer".into()));
    engine.dispatch(TableAction::HeaderClicked("total".into()));
    assert_eq!(engine.view().sort, Some(&SortState::ascending("total")));
}

#[test]
fn test_computed_column_is_not_sortable() {
    let mut engine = engine(TableOptions::new());
    let headers = engine.view().headers;
    assert!(!headers[3].sortable);
    assert_eq!(headers[3].key, None);
    assert!(!engine.dispatch(TableAction::HeaderClicked(String::new())));
}

#[test]
fn test_header_reports_sort_direction() {
    let mut engine = engine(TableOptions::new());
    engine.dispatch(TableAction::HeaderClicked("total".into()));
    let sorted: Vec<_> = engine.view().headers.iter().map(|h| h.sorted).collect();
    assert_eq!(sorted, [None, Some(Direction::Ascending), None, None]);
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_filter_reads_raw_value_not_renderer() {
    let mut engine = engine(TableOptions::new().with_filter_column("status"));
    engine.dispatch(TableAction::SetFilterQuery("PAID".into()));
    let view = engine.view();
    assert_eq!(view.total_rows, 2);
    assert_eq!(ids(&view), ["inv-1", "inv-4"]);
}

#[test]
fn test_filter_matches_timestamp_as_sent() {
    let records: Vec<Record> = parse_records(
        r#"[
            {"id": "a", "at": "2024-01-10T10:00:00+02:00"},
            {"id": "b", "at": "2024-01-10T08:00:00Z"},
            {"id": "c", "at": "2024-01-10T10:00:00.250Z"}
        ]"#,
    )
    .unwrap();
    let mut engine = TableEngine::new(
        vec![Column::new("at", "At")],
        records,
        TableOptions::new().with_filter_column("at"),
    )
    .unwrap();

    engine.dispatch(TableAction::SetFilterQuery("10:00".into()));
    assert_eq!(ids(&engine.view()), ["a", "c"]);

    engine.dispatch(TableAction::SetFilterQuery("+02:00".into()));
    assert_eq!(ids(&engine.view()), ["a"]);

    engine.dispatch(TableAction::SetFilterQuery(".250".into()));
    assert_eq!(ids(&engine.view()), ["c"]);
}

#[test]
fn test_empty_filter_result_and_next_page_is_noop() {
    let mut engine = engine(TableOptions::new().with_filter_column("customer"));
    engine.dispatch(TableAction::SetFilterQuery("zzz".into()));

    let view = engine.view();
    assert!(view.is_empty);
    assert_eq!(view.page_count, 0);
    assert_eq!(view.page_index, 0);
    assert!(!view.can_go_next);

    let before = engine.state().clone();
    assert!(!engine.dispatch(TableAction::NextPage));
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_filter_resets_to_first_page() {
    let mut engine = engine(TableOptions::new().with_filter_column("customer").with_page_size(2));
    engine.dispatch(TableAction::LastPage);
    assert_eq!(engine.view().page_index, 2);

    engine.dispatch(TableAction::SetFilterQuery("a".into()));
    let view = engine.view();
    assert_eq!(view.page_index, 0);
    assert_eq!(view.total_rows, 3);
}

#[test]
fn test_switching_filter_column_clears_query() {
    let mut engine = engine(TableOptions::new().with_filter_column("customer"));
    engine.dispatch(TableAction::SetFilterQuery("ana".into()));
    engine.dispatch(TableAction::SetFilterColumn(Some("status".into())));
    assert_eq!(engine.state().filter.query, "");
    assert_eq!(engine.view().total_rows, 5);
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_client_pagination_slices() {
    let mut engine = engine(TableOptions::new().with_page_size(2));
    assert_eq!(ids(&engine.view()), ["inv-1", "inv-2"]);
    engine.dispatch(TableAction::NextPage);
    assert_eq!(ids(&engine.view()), ["inv-3", "inv-4"]);
    engine.dispatch(TableAction::NextPage);
    let view = engine.view();
    assert_eq!(ids(&view), ["inv-5"]);
    assert!(!view.can_go_next);
    assert!(view.can_go_prev);
}

#[test]
fn test_manual_pagination_never_slices() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let mut engine = engine(TableOptions::new().with_manual_pagination(4).with_page_size(2))
        .with_hooks(TableHooks::new().on_pagination_change(move |p| sink.lock().unwrap().push(p)));

    let view = engine.view();
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.page_count, 4);
    assert!(view.can_go_next);

    engine.dispatch(TableAction::SetPageSize(20));
    assert_eq!(*changes.lock().unwrap(), [PaginationState::new(0, 20)]);
    assert_eq!(ids(&engine.view()), ["inv-1", "inv-2", "inv-3", "inv-4", "inv-5"]);

    engine.dispatch(TableAction::LastPage);
    assert!(!engine.view().can_go_next);
    assert_eq!(changes.lock().unwrap().len(), 2);
}

#[test]
fn test_manual_page_count_shrink_clamps_and_notifies() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let mut engine = engine(TableOptions::new().with_manual_pagination(10))
        .with_hooks(TableHooks::new().on_pagination_change(move |p| sink.lock().unwrap().push(p)));

    engine.dispatch(TableAction::SetPageIndex(7));
    engine.set_page_count(3);
    assert_eq!(engine.view().page_index, 2);
    assert_eq!(
        *changes.lock().unwrap(),
        [PaginationState::new(7, 10), PaginationState::new(2, 10)]
    );
}

#[test]
fn test_zero_page_size_in_options_is_normalized() {
    let options = TableOptions {
        pagination: PaginationState {
            page_index: 0,
            page_size: 0,
        },
        ..TableOptions::new()
    };
    let engine = engine(options);
    let view = engine.view();
    assert_eq!(engine.state().pagination.page_size, 1);
    assert_eq!(view.page_count, 5);
    assert_eq!(ids(&view), ["inv-1"]);
    assert!(!view.is_empty);
    assert!(view.can_go_next);
}

#[test]
fn test_initial_page_beyond_end_is_clamped() {
    let engine = engine(TableOptions::new().with_pagination(PaginationState::new(9, 2)));
    assert_eq!(engine.view().page_index, 2);
}

#[test]
fn test_set_data_keeps_sort_and_clamps() {
    let mut engine = engine(TableOptions::new().with_page_size(2));
    engine.dispatch(TableAction::HeaderClicked("customer".into()));
    engine.dispatch(TableAction::LastPage);

    let mut fewer = invoices();
    fewer.truncate(3);
    engine.set_data(fewer);

    let view = engine.view();
    assert_eq!(view.page_index, 1);
    assert_eq!(view.sort, Some(&SortState::ascending("customer")));
    assert_eq!(ids(&view), ["inv-2"]);
}

// =============================================================================
// Headers, cells, hooks
// =============================================================================

#[test]
fn test_translations_override_titles() {
    let mut engine = engine(TableOptions::new().with_translation("customer", "Cliente"));
    let labels: Vec<_> = engine.view().headers.iter().map(|h| h.label.to_string()).collect();
    assert_eq!(labels, ["Cliente", "Total", "Status", ""]);

    engine.set_column_translations(HashMap::from([("status".to_string(), "Estado".to_string())]));
    let labels: Vec<_> = engine.view().headers.iter().map(|h| h.label.to_string()).collect();
    assert_eq!(labels, ["Customer", "Total", "Estado", ""]);
}

#[test]
fn test_cells_use_renderers() {
    let engine = engine(TableOptions::new());
    let rows = invoices();
    let cells: Vec<_> = engine.cells(&rows[2]).iter().map(Cell::display).collect();
    assert_eq!(cells, ["Bruno", "", "overdue", "open inv-3"]);
    assert!(matches!(engine.cells(&rows[0])[2], Cell::Badge(_)));
}

#[test]
fn test_hidden_columns_survive_set_data() {
    let mut engine = engine(TableOptions::new());
    engine.dispatch(TableAction::ToggleColumn("total".into()));
    engine.set_data(invoices());
    assert_eq!(engine.view().headers.len(), 3);
}

#[test]
fn test_create_and_select_hooks() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let (on_create, on_select) = (Arc::clone(&events), Arc::clone(&events));
    let mut engine = engine(TableOptions::new()).with_hooks(
        TableHooks::new()
            .on_create(move || on_create.lock().unwrap().push("create".to_string()))
            .on_row_select(move |row: &Record| {
                on_select
                    .lock()
                    .unwrap()
                    .push(format!("select {}", row.id().unwrap_or_default()))
            }),
    );

    let view = engine.view();
    assert!(view.create_enabled);
    assert!(!view.refresh_enabled);

    assert!(engine.create());
    assert!(engine.select_row(3));
    assert!(!engine.refresh());
    assert_eq!(*events.lock().unwrap(), ["create", "select inv-4"]);
}

#[test]
fn test_empty_data() {
    let engine = TableEngine::new(columns(), Vec::new(), TableOptions::new()).unwrap();
    let view = engine.view();
    assert!(view.is_empty);
    assert_eq!(view.total_rows, 0);
    assert_eq!(view.page_count, 0);
    assert!(!view.can_go_prev);
    assert!(!view.can_go_next);
}
