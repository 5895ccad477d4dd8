//! Single-column sort state and the value comparator.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

use super::TableRow;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl Direction {
    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// The active sort: one column, one direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on a column.
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    /// Creates a descending sort on a column.
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }
}

/// Returns the sort state after a header interaction on `column`.
///
/// The same column cycles none → ascending → descending → none; any other
/// column starts at ascending and drops the previous sort.
pub fn next_sort(current: Option<&SortState>, column: &str) -> Option<SortState> {
    match current {
        Some(sort) if sort.column == column => match sort.direction {
            Direction::Ascending => Some(SortState::descending(column)),
            Direction::Descending => None,
        },
        _ => Some(SortState::ascending(column)),
    }
}

/// Comparable projection of a value.
///
/// Variant order is the cross-type order: blanks first, then numbers, then
/// text.
#[derive(Debug)]
enum SortKey<'a> {
    Blank,
    Number(Number),
    Text(Cow<'a, str>),
}

/// A number as `f64`, plus its exact value when it has one.
///
/// Ordered by the `f64` first, then by the exact value, with inexact numbers
/// before exact ones. `f64` rounding is monotone, so exact values keep their
/// true order even past 2^53.
#[derive(Debug)]
struct Number {
    approx: f64,
    exact: Option<Decimal>,
}

impl Number {
    fn exact(exact: Decimal) -> Option<Self> {
        exact.to_f64().map(|approx| Self {
            approx,
            exact: Some(exact),
        })
    }

    fn integer(n: i64) -> Self {
        Self {
            approx: n as f64,
            exact: Some(Decimal::from(n)),
        }
    }

    fn float(approx: f64) -> Self {
        Self {
            approx,
            exact: None,
        }
    }

    fn cmp(&self, other: &Number) -> Ordering {
        self.approx
            .total_cmp(&other.approx)
            .then_with(|| self.exact.cmp(&other.exact))
    }
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Blank => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

fn sort_key(value: &Value) -> SortKey<'_> {
    match value {
        Value::Null => SortKey::Blank,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                SortKey::Blank
            } else if let Some(number) = parse_number(trimmed) {
                SortKey::Number(number)
            } else {
                SortKey::Text(Cow::Borrowed(s))
            }
        }
        Value::Int(n) => SortKey::Number(Number::integer(i64::from(*n))),
        Value::Long(n) => SortKey::Number(Number::integer(*n)),
        Value::Decimal(d) => match Number::exact(*d) {
            Some(number) => SortKey::Number(number),
            None => SortKey::Text(Cow::Owned(value.to_text())),
        },
        Value::Float(n) => SortKey::Number(Number::float(*n)),
        other => SortKey::Text(Cow::Owned(other.to_text())),
    }
}

/// Parses a numeric-looking string. Non-finite spellings (`inf`, `NaN`) are
/// text, not numbers. Plain decimal spellings also keep their exact value.
fn parse_number(s: &str) -> Option<Number> {
    let approx = s.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some(Number {
        approx,
        exact: Decimal::from_str(s).ok(),
    })
}

/// Total order used for sorting cells in ascending direction.
///
/// - null, missing and blank strings sort first;
/// - numbers (`Int`, `Long`, `Float`, `Decimal`, and strings that parse as a
///   finite number) come next and compare numerically, so `"9" < "10"`;
/// - everything else compares as text in byte order, with dates as
///   `YYYY-MM-DD` and date-times as RFC 3339 in the offset they came with.
///
/// Descending order is the exact reverse.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (a, b) = (sort_key(a), sort_key(b));
    match (&a, &b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => a.rank().cmp(&b.rank()),
    }
}

/// Compares two rows on a field; missing fields compare as null.
pub fn compare_rows<R: TableRow>(a: &R, b: &R, key: &str) -> Ordering {
    let a = a.field(key);
    let b = b.field(key);
    compare_values(
        a.as_deref().unwrap_or(&Value::Null),
        b.as_deref().unwrap_or(&Value::Null),
    )
}

/// Sorts row indices in place with a stable sort.
pub fn sort_indices<R: TableRow>(indices: &mut [usize], rows: &[R], sort: &SortState) {
    indices.sort_by(|&a, &b| {
        sort.direction
            .apply(compare_rows(&rows[a], &rows[b], &sort.column))
    });
}
