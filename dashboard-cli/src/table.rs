//! Building a table engine from a JSON record file.

use std::fs;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use dashboard_lib::config::DashboardConfig;
use dashboard_lib::model::ID_FIELD;
use dashboard_lib::model::Record;
use dashboard_lib::model::map_records;
use dashboard_lib::table::Column;
use dashboard_lib::table::SortState;
use dashboard_lib::table::TableAction;
use dashboard_lib::table::TableEngine;
use dashboard_lib::table::TableOptions;
use log::debug;
use log::info;

use crate::cli::TableArgs;

/// Keys rendered as status badges.
const STATUS_KEYS: [&str; 2] = ["status", "level"];

/// Reads records and their keys, in document order.
pub fn load(path: &Path) -> Result<(Vec<String>, Vec<Record>)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let records = map_records(&payload)
        .with_context(|| format!("{} does not hold a record collection", path.display()))?;
    Ok((collect_keys(&payload), records))
}

/// Every field key seen across the records, first occurrence first.
fn collect_keys(payload: &serde_json::Value) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let items: Box<dyn Iterator<Item = &serde_json::Value> + '_> = match payload {
        serde_json::Value::Array(items) => Box::new(items.iter()),
        serde_json::Value::Object(entries) => {
            keys.push(ID_FIELD.to_string());
            Box::new(entries.values())
        }
        _ => Box::new(std::iter::empty()),
    };

    for item in items {
        if let serde_json::Value::Object(fields) = item {
            for key in fields.keys() {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
    }
    keys
}

/// One column per key; status-like keys render as badges.
pub fn columns(keys: &[String]) -> Vec<Column<Record>> {
    keys.iter()
        .map(|key| {
            if STATUS_KEYS.contains(&key.as_str()) {
                Column::status(key.as_str(), key.as_str())
            } else {
                Column::new(key.as_str(), key.as_str())
            }
        })
        .collect()
}

/// Builds the engine and applies the requested state.
pub fn build(args: &TableArgs, config: &DashboardConfig) -> Result<TableEngine<Record>> {
    let (keys, records) = load(&args.file)?;
    info!("Loaded {} records with {} columns", records.len(), keys.len());

    let pagination = config
        .pagination_for(args.page_size)
        .context("invalid --page-size")?;
    let mut options = TableOptions::new().with_pagination(pagination);
    if let Some(key) = &args.filter_column {
        options = options.with_filter_column(key.as_str());
    }
    if let Some(page_count) = args.page_count {
        options = options.with_manual_pagination(page_count);
    }

    let mut engine =
        TableEngine::new(columns(&keys), records, options).context("invalid table setup")?;

    let mut actions = Vec::new();
    if let Some(column) = &args.sort {
        let sort = if args.desc {
            SortState::descending(column.as_str())
        } else {
            SortState::ascending(column.as_str())
        };
        actions.push(TableAction::SetSort(Some(sort)));
    }
    if let Some(query) = &args.query {
        actions.push(TableAction::SetFilterQuery(query.clone()));
    }
    for key in &args.hidden {
        actions.push(TableAction::ToggleColumn(key.clone()));
    }
    let page_index = usize::try_from(args.page.saturating_sub(1)).unwrap_or(usize::MAX);
    actions.push(TableAction::SetPageIndex(page_index));

    for action in actions {
        let description = format!("{:?}", action);
        if !engine.dispatch(action) {
            debug!("{} left the table unchanged", description);
        }
    }
    Ok(engine)
}
