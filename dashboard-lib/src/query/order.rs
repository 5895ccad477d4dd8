//! Sort clauses for server-side ordering.

use crate::table::Direction;
use crate::table::SortState;

/// Renders a sort state as an `ORDER BY` fragment: `key ASC` or `key DESC`.
///
/// Used in manual pagination mode, where the backend sorts the full result
/// set and the engine only orders the page it holds.
///
/// # Example
///
/// ```
/// use dashboard_lib::query::order_clause;
/// use dashboard_lib::table::SortState;
///
/// assert_eq!(order_clause(&SortState::descending("created_at")), "created_at DESC");
/// ```
pub fn order_clause(sort: &SortState) -> String {
    let direction = match sort.direction {
        Direction::Ascending => "ASC",
        Direction::Descending => "DESC",
    };
    format!("{} {}", sort.column, direction)
}
