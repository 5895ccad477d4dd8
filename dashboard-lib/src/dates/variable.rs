//! The date variable grammar.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::DateTime;
use chrono::Datelike;
use chrono::Days;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use regex::Regex;

use crate::error::DateError;

/// Output and literal format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed keyword tokens. `TODAY+N` / `TODAY-N` extend `TODAY`.
pub const KEYWORDS: [&str; 9] = [
    "TODAY",
    "YESTERDAY",
    "TOMORROW",
    "WEEK_START",
    "WEEK_END",
    "MONTH_START",
    "MONTH_END",
    "YEAR_START",
    "YEAR_END",
];

static LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid literal regex"));

/// A parsed date variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateVariable {
    Today,
    /// `TODAY+N` / `TODAY-N`. Offsets too large for `i64` saturate and
    /// fail to resolve.
    TodayOffset(i64),
    Yesterday,
    Tomorrow,
    WeekStart,
    WeekEnd,
    MonthStart,
    MonthEnd,
    YearStart,
    YearEnd,
    /// A literal `YYYY-MM-DD` date.
    Literal(NaiveDate),
}

impl DateVariable {
    /// Returns `true` for symbolic tokens, `false` for literal dates.
    pub fn is_keyword(&self) -> bool {
        !matches!(self, DateVariable::Literal(_))
    }

    /// Resolves this variable against a reference date.
    ///
    /// Returns `None` when the result falls outside chrono's calendar range.
    pub fn resolve_from(&self, today: NaiveDate) -> Option<NaiveDate> {
        match *self {
            DateVariable::Today => Some(today),
            DateVariable::TodayOffset(days) => offset_days(today, days),
            DateVariable::Yesterday => offset_days(today, -1),
            DateVariable::Tomorrow => offset_days(today, 1),
            DateVariable::WeekStart => week_start(today),
            DateVariable::WeekEnd => week_start(today).and_then(|start| offset_days(start, 6)),
            DateVariable::MonthStart => today.with_day(1),
            DateVariable::MonthEnd => month_end(today),
            DateVariable::YearStart => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            DateVariable::YearEnd => NaiveDate::from_ymd_opt(today.year(), 12, 31),
            DateVariable::Literal(date) => Some(date),
        }
    }
}

impl FromStr for DateVariable {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let variable = match token {
            "TODAY" => DateVariable::Today,
            "YESTERDAY" => DateVariable::Yesterday,
            "TOMORROW" => DateVariable::Tomorrow,
            "WEEK_START" => DateVariable::WeekStart,
            "WEEK_END" => DateVariable::WeekEnd,
            "MONTH_START" => DateVariable::MonthStart,
            "MONTH_END" => DateVariable::MonthEnd,
            "YEAR_START" => DateVariable::YearStart,
            "YEAR_END" => DateVariable::YearEnd,
            _ => {
                let parsed = if let Some(offset) = token.strip_prefix("TODAY") {
                    parse_offset(offset).map(DateVariable::TodayOffset)
                } else if LITERAL.is_match(token) {
                    NaiveDate::parse_from_str(token, DATE_FORMAT)
                        .ok()
                        .map(DateVariable::Literal)
                } else {
                    None
                };
                parsed.ok_or_else(|| DateError::invalid(s))?
            }
        };
        Ok(variable)
    }
}

impl fmt::Display for DateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateVariable::Today => f.write_str("TODAY"),
            DateVariable::TodayOffset(days) if *days < 0 => write!(f, "TODAY-{}", days.unsigned_abs()),
            DateVariable::TodayOffset(days) => write!(f, "TODAY+{}", days),
            DateVariable::Yesterday => f.write_str("YESTERDAY"),
            DateVariable::Tomorrow => f.write_str("TOMORROW"),
            DateVariable::WeekStart => f.write_str("WEEK_START"),
            DateVariable::WeekEnd => f.write_str("WEEK_END"),
            DateVariable::MonthStart => f.write_str("MONTH_START"),
            DateVariable::MonthEnd => f.write_str("MONTH_END"),
            DateVariable::YearStart => f.write_str("YEAR_START"),
            DateVariable::YearEnd => f.write_str("YEAR_END"),
            DateVariable::Literal(date) => f.write_str(&format_date(*date)),
        }
    }
}

/// Parses the `+N` / `-N` suffix of a `TODAY` offset.
///
/// The sign is mandatory and `N` is one or more ASCII digits.
fn parse_offset(suffix: &str) -> Option<i64> {
    let (negative, digits) = match suffix.as_bytes().first()? {
        b'+' => (false, &suffix[1..]),
        b'-' => (true, &suffix[1..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn offset_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Monday of the ISO week containing `date`. Sunday is day 7, so a Sunday
/// belongs to the week that started six days earlier.
fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let day_of_week = date.weekday().number_from_monday();
    offset_days(date, -i64::from(day_of_week - 1))
}

fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year().checked_add(1)?, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}

/// Formats a date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Anything that can act as "today" for resolution.
///
/// Time-of-day components are always dropped: a date-time normalizes to
/// midnight of its calendar date, and a zoned date-time uses the date in its
/// own zone, so `DateTime<Local>` yields local midnight.
pub trait ReferenceDate {
    /// Returns the calendar date used as "today".
    fn reference_date(&self) -> NaiveDate;
}

impl ReferenceDate for NaiveDate {
    fn reference_date(&self) -> NaiveDate {
        *self
    }
}

impl ReferenceDate for NaiveDateTime {
    fn reference_date(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> ReferenceDate for DateTime<Tz> {
    fn reference_date(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: ReferenceDate + ?Sized> ReferenceDate for &T {
    fn reference_date(&self) -> NaiveDate {
        (**self).reference_date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("TODAY".parse::<DateVariable>(), Ok(DateVariable::Today));
        assert_eq!(" WEEK_END ".parse::<DateVariable>(), Ok(DateVariable::WeekEnd));
        assert_eq!("TODAY+0".parse::<DateVariable>(), Ok(DateVariable::TodayOffset(0)));
        assert_eq!("TODAY-30".parse::<DateVariable>(), Ok(DateVariable::TodayOffset(-30)));
        assert_eq!("TODAY+365".parse::<DateVariable>(), Ok(DateVariable::TodayOffset(365)));
    }

    #[test]
    fn test_parse_rejects() {
        for token in ["today", "TODAYS", "TODAY7", "TODAY+", "TODAY+-1", "TODAY + 1", "NOW", "", "2024-1-05", "2024-02-30"] {
            assert_eq!(
                token.parse::<DateVariable>(),
                Err(DateError::invalid(token)),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(
            "2024-02-29".parse::<DateVariable>(),
            Ok(DateVariable::Literal(date(2024, 2, 29)))
        );
    }

    #[test]
    fn test_month_end_handles_december_and_leap_years() {
        assert_eq!(month_end(date(2023, 12, 5)), Some(date(2023, 12, 31)));
        assert_eq!(month_end(date(2024, 2, 1)), Some(date(2024, 2, 29)));
        assert_eq!(month_end(date(2023, 2, 28)), Some(date(2023, 2, 28)));
    }

    #[test]
    fn test_display_round_trips() {
        for token in ["TODAY", "TODAY+3", "TODAY-12", "YEAR_END", "2024-01-01"] {
            assert_eq!(token.parse::<DateVariable>().unwrap().to_string(), token);
        }
    }

    #[test]
    fn test_huge_offset_saturates() {
        let variable: DateVariable = "TODAY+99999999999999999999999".parse().unwrap();
        assert_eq!(variable, DateVariable::TodayOffset(i64::MAX));
        assert_eq!(variable.resolve_from(date(2024, 1, 10)), None);
    }
}
