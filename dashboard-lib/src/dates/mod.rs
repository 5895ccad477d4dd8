//! Date variable resolution.
//!
//! Filter conditions built in the dashboard's query builder may reference
//! symbolic dates instead of literal ones, so a saved filter such as
//! `created_at >= WEEK_START` keeps meaning "this week" tomorrow. This module
//! resolves those tokens against a reference date and splices the results
//! back into condition strings.
//!
//! # Grammar
//!
//! | Token | Resolves to |
//! |-------|-------------|
//! | `TODAY` | the reference date |
//! | `TODAY+N`, `TODAY-N` | the reference date offset by `N` days |
//! | `YESTERDAY`, `TOMORROW` | `TODAY-1`, `TODAY+1` |
//! | `WEEK_START`, `WEEK_END` | Monday and Sunday of the ISO week |
//! | `MONTH_START`, `MONTH_END` | first and last day of the month |
//! | `YEAR_START`, `YEAR_END` | January 1 and December 31 |
//! | `YYYY-MM-DD` | the literal date, validated |
//!
//! Keywords are case-sensitive. Every resolved date is formatted as
//! `YYYY-MM-DD`.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use dashboard_lib::dates;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! assert_eq!(
//!     dates::rewrite_condition("due <= TODAY+7", today),
//!     "due <= '2024-01-17'"
//! );
//! ```

mod resolve;
mod rewrite;
mod variable;

pub use resolve::*;
pub use rewrite::*;
pub use variable::*;
