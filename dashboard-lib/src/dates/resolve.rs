//! Token resolution against a reference date.

use chrono::Local;
use chrono::NaiveDate;

use super::DateVariable;
use super::ReferenceDate;
use crate::error::DateError;

/// Resolves a date token to a calendar date.
///
/// `today` is normalized to its calendar date before any arithmetic, so the
/// same token and reference day always yield the same date.
///
/// # Errors
///
/// - [`DateError::InvalidDateVariable`] when the token is outside the grammar.
/// - [`DateError::OutOfRange`] when a well-formed token resolves outside the
///   representable calendar (for example `TODAY+999999999999`).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dashboard_lib::dates::resolve;
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(
///     resolve("WEEK_START", wednesday).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
/// );
/// assert!(resolve("NEXT_WEEK", wednesday).is_err());
/// ```
pub fn resolve(token: &str, today: impl ReferenceDate) -> Result<NaiveDate, DateError> {
    let variable: DateVariable = token.parse()?;
    variable
        .resolve_from(today.reference_date())
        .ok_or_else(|| DateError::out_of_range(token))
}

/// Returns `true` if `token` belongs to the grammar [`resolve`] parses.
///
/// Both functions share [`DateVariable`]'s parser, so they accept the same
/// language.
pub fn is_recognized(token: &str) -> bool {
    token.parse::<DateVariable>().is_ok()
}

/// Returns today's date on the local wall clock.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}
