//! Generic table engine.
//!
//! Every list page of the dashboard (appointments, users, quotes, invoices,
//! payments, logs) is the same table with different columns. This module
//! holds the shared behavior: single-column sorting, a free-text filter on
//! one column, client or server-driven pagination, column visibility, and
//! pass-through hooks for refresh, create and row selection.
//!
//! Rows are any type implementing [`TableRow`]. State changes go through
//! [`reduce`], and [`TableEngine`] ties state, rows and hooks together.

mod column;
mod engine;
mod filter;
mod pagination;
mod row;
mod sort;
mod state;

pub use column::*;
pub use engine::*;
pub use filter::*;
pub use pagination::*;
pub use row::*;
pub use sort::*;
pub use state::*;
