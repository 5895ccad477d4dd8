//! Date variable resolution against fixed reference dates.

use chrono::Local;
use chrono::NaiveDate;
use chrono::TimeZone;
use chrono::Utc;
use dashboard_lib::dates::is_recognized;
use dashboard_lib::dates::resolve;
use dashboard_lib::dates::rewrite_condition;
use dashboard_lib::dates::split_list_expression;
use dashboard_lib::error::DateError;
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn resolved(token: &str, today: NaiveDate) -> String {
    resolve(token, today).unwrap().format("%Y-%m-%d").to_string()
}

// =============================================================================
// Keyword bounds
// =============================================================================

#[test]
fn test_wednesday_bounds() {
    let today = date(2024, 1, 10);
    let expected = [
        ("TODAY", "2024-01-10"),
        ("YESTERDAY", "2024-01-09"),
        ("TOMORROW", "2024-01-11"),
        ("WEEK_START", "2024-01-08"),
        ("WEEK_END", "2024-01-14"),
        ("MONTH_START", "2024-01-01"),
        ("MONTH_END", "2024-01-31"),
        ("YEAR_START", "2024-01-01"),
        ("YEAR_END", "2024-12-31"),
    ];
    for (token, date) in expected {
        assert_eq!(resolved(token, today), date, "{}", token);
    }
}

#[test]
fn test_sunday_belongs_to_previous_monday() {
    let sunday = date(2024, 1, 14);
    assert_eq!(resolved("WEEK_START", sunday), "2024-01-08");
    assert_eq!(resolved("WEEK_END", sunday), "2024-01-14");
}

#[test]
fn test_week_across_year_boundary() {
    let today = date(2025, 1, 1);
    assert_eq!(resolved("WEEK_START", today), "2024-12-30");
    assert_eq!(resolved("WEEK_END", today), "2025-01-05");
}

#[test]
fn test_month_end_in_leap_february() {
    assert_eq!(resolved("MONTH_END", date(2024, 2, 10)), "2024-02-29");
    assert_eq!(resolved("MONTH_END", date(2023, 2, 10)), "2023-02-28");
    assert_eq!(resolved("MONTH_END", date(2024, 12, 31)), "2024-12-31");
}

#[test]
fn test_offsets_cross_month_and_year() {
    let today = date(2024, 12, 30);
    assert_eq!(resolved("TODAY+3", today), "2025-01-02");
    assert_eq!(resolved("TODAY-30", today), "2024-11-30");
    assert_eq!(resolved("TODAY+0", today), "2024-12-30");
}

// =============================================================================
// Reference date normalization
// =============================================================================

#[test]
fn test_time_of_day_is_dropped() {
    let late = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap();
    let early = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 1).unwrap();
    assert_eq!(resolve("TODAY", late).unwrap(), date(2024, 1, 10));
    assert_eq!(resolve("TODAY", early), resolve("TODAY", late));
    assert_eq!(
        resolve("TODAY", late.naive_utc()).unwrap(),
        date(2024, 1, 10)
    );
}

#[test]
fn test_local_datetime_uses_local_calendar_date() {
    let now = Local::now();
    assert_eq!(resolve("TODAY", now).unwrap(), now.date_naive());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unknown_tokens() {
    let today = date(2024, 1, 10);
    for token in ["NEXT_WEEK", "today", "TODAY+", "TODAY+-1", "2024-02-30", ""] {
        assert!(
            matches!(resolve(token, today), Err(DateError::InvalidDateVariable(_))),
            "{:?}",
            token
        );
        assert!(!is_recognized(token), "{:?}", token);
    }
}

#[test]
fn test_out_of_range_offset() {
    let err = resolve("TODAY+999999999999", date(2024, 1, 10)).unwrap_err();
    assert_eq!(err, DateError::out_of_range("TODAY+999999999999"));
    assert!(is_recognized("TODAY+999999999999"));
}

#[test]
fn test_surrounding_whitespace_is_tolerated() {
    assert_eq!(resolved("  WEEK_END\t", date(2024, 1, 10)), "2024-01-14");
    assert!(is_recognized(" TODAY-1 "));
}

// =============================================================================
// Condition and list rewriting
// =============================================================================

#[test]
fn test_rewrite_condition() {
    let today = date(2024, 1, 10);
    assert_eq!(
        rewrite_condition("date >= TODAY-7 AND date <= TODAY", today),
        "date >= '2024-01-03' AND date <= '2024-01-10'"
    );
    assert_eq!(
        rewrite_condition("name = 'TODAYS special'", today),
        "name = 'TODAYS special'"
    );
    assert_eq!(
        rewrite_condition("created BETWEEN MONTH_START AND MONTH_END", today),
        "created BETWEEN '2024-01-01' AND '2024-01-31'"
    );
}

#[test]
fn test_rewrite_leaves_literals_alone() {
    let today = date(2024, 1, 10);
    let condition = "due = 2024-01-01 OR due > YESTERDAY";
    assert_eq!(
        rewrite_condition(condition, today),
        "due = 2024-01-01 OR due > '2024-01-09'"
    );
}

#[test]
fn test_split_list_expression() {
    let today = date(2024, 1, 10);
    assert_eq!(
        split_list_expression("TODAY, YESTERDAY, 2024-01-01", today),
        ["2024-01-10", "2024-01-09", "2024-01-01"]
    );
    assert_eq!(
        split_list_expression("WEEK_START and WEEK_END", today),
        ["2024-01-08", "2024-01-14"]
    );
    assert_eq!(
        split_list_expression("pending,, paid ", today),
        ["pending", "paid"]
    );
    assert!(split_list_expression("   ", today).is_empty());
}
