//! Query helpers for the dashboard backend.
//!
//! The backend accepts SQL-like condition strings and sort clauses, and
//! answers with pages of records. This module builds the former and wraps the
//! latter.
//!
//! - [`Condition`] - typed condition builder, rendered to condition text
//! - [`order_clause`] - `ORDER BY` fragment for a table sort state
//! - [`Page`] - one server page plus its reported total

mod condition;
mod order;
mod page;

pub use condition::Condition;
pub use condition::Operand;
pub use order::order_clause;
pub use page::Page;
