//! Dashboard core library
//!
//! The shared, UI-independent core of the business administration dashboard:
//! a generic table engine, a resolver for symbolic date variables, and the
//! record, query, session and configuration layers around them.

pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod query;
pub mod session;
pub mod table;
