//! Text and JSON output for table views.

use dashboard_lib::table::Cell;
use dashboard_lib::table::SortState;
use dashboard_lib::table::TableEngine;
use dashboard_lib::table::TableRow;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Column separator in text output.
const GAP: &str = "  ";

/// JSON shape of a rendered page.
#[derive(Debug, Serialize)]
struct JsonPage<'a> {
    page: usize,
    page_count: usize,
    total_rows: usize,
    sort: Option<&'a SortState>,
    headers: Vec<&'a str>,
    rows: Vec<Vec<Cell>>,
}

/// Renders the current page as an aligned text table with a footer line.
pub fn text<R: TableRow>(engine: &TableEngine<R>) -> String {
    let view = engine.view();
    let headers: Vec<String> = view
        .headers
        .iter()
        .map(|header| match header.sorted {
            Some(direction) => format!("{} {}", header.label, arrow(direction)),
            None => header.label.to_string(),
        })
        .collect();
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| engine.cells(row).iter().map(Cell::display).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);

    if view.is_empty {
        out.push_str("No records.\n");
    }
    for row in &rows {
        push_line(&mut out, row, &widths);
    }

    out.push_str(&format!(
        "Page {} of {} ({} rows)\n",
        view.page_index + 1,
        view.page_count.max(1),
        view.total_rows
    ));
    out
}

/// Renders the current page as a JSON document.
pub fn json<R: TableRow>(engine: &TableEngine<R>) -> serde_json::Result<String> {
    let view = engine.view();
    let page = JsonPage {
        page: view.page_index + 1,
        page_count: view.page_count,
        total_rows: view.total_rows,
        sort: view.sort,
        headers: view.headers.iter().map(|h| h.label).collect(),
        rows: view.rows.iter().map(|row| engine.cells(row)).collect(),
    };
    serde_json::to_string_pretty(&page)
}

fn arrow(direction: dashboard_lib::table::Direction) -> &'static str {
    match direction {
        dashboard_lib::table::Direction::Ascending => "^",
        dashboard_lib::table::Direction::Descending => "v",
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str(GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
