//! Splicing resolved dates into condition strings.

use std::sync::LazyLock;

use log::debug;
use log::warn;
use regex::Regex;

use super::DateVariable;
use super::ReferenceDate;
use super::format_date;
use super::resolve;

/// Keyword tokens with an optional `TODAY` offset. The leading `\b` gives the
/// left word boundary; the right one is checked by hand because a greedy
/// offset must not end inside a longer word (`TODAY-7x`).
static KEYWORD_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:TODAY(?:[+-][0-9]+)?|YESTERDAY|TOMORROW|WEEK_START|WEEK_END|MONTH_START|MONTH_END|YEAR_START|YEAR_END)",
    )
    .expect("valid keyword regex")
});

/// List separators: a comma, or the word `AND` with whitespace on both sides.
static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",|\s+(?i:and)\s+").expect("valid separator regex"));

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replaces every date keyword in `condition` with its resolved date.
///
/// Each keyword becomes `'YYYY-MM-DD'`. A keyword that is already wrapped in
/// single quotes keeps those quotes and only its content is replaced. Literal
/// dates are not touched, and neither are words that merely start with a
/// keyword (`TODAYS`, `WEEK_START_AT`). A token that fails to resolve stays
/// in place and is logged; the rest of the string is still rewritten.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dashboard_lib::dates::rewrite_condition;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(
///     rewrite_condition("date >= TODAY-7 AND date <= TODAY", today),
///     "date >= '2024-01-03' AND date <= '2024-01-10'"
/// );
/// ```
pub fn rewrite_condition(condition: &str, today: impl ReferenceDate) -> String {
    let today = today.reference_date();
    let mut rewritten = String::with_capacity(condition.len() + 8);
    let mut copied_up_to = 0;

    for found in KEYWORD_TOKEN.find_iter(condition) {
        let before = condition[..found.start()].chars().next_back();
        let after = condition[found.end()..].chars().next();
        if after.is_some_and(is_word_char) {
            continue;
        }

        let token = found.as_str();
        let date = match resolve(token, today) {
            Ok(date) => format_date(date),
            Err(err) => {
                warn!("Leaving date token unresolved in condition: {}", err);
                continue;
            }
        };

        rewritten.push_str(&condition[copied_up_to..found.start()]);
        if before == Some('\'') && after == Some('\'') {
            rewritten.push_str(&date);
        } else {
            rewritten.push('\'');
            rewritten.push_str(&date);
            rewritten.push('\'');
        }
        copied_up_to = found.end();
    }

    rewritten.push_str(&condition[copied_up_to..]);
    if copied_up_to > 0 {
        debug!("Rewrote condition {:?} -> {:?}", condition, rewritten);
    }
    rewritten
}

/// Splits a list expression and resolves the date keywords in it.
///
/// Parts are separated by commas or by the word `AND` (any case) surrounded
/// by whitespace. Parts are trimmed and empty parts dropped. Parts that are a
/// date keyword become `YYYY-MM-DD`; everything else, including literal
/// dates, opaque values and tokens that fail to resolve, is returned as is.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dashboard_lib::dates::split_list_expression;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(
///     split_list_expression("TODAY, YESTERDAY, 2024-01-01", today),
///     vec!["2024-01-10", "2024-01-09", "2024-01-01"]
/// );
/// ```
pub fn split_list_expression(expression: &str, today: impl ReferenceDate) -> Vec<String> {
    let today = today.reference_date();

    LIST_SEPARATOR
        .split(expression)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<DateVariable>() {
            Ok(variable) if variable.is_keyword() => match resolve(part, today) {
                Ok(date) => format_date(date),
                Err(err) => {
                    warn!("Leaving list item unresolved: {}", err);
                    part.to_string()
                }
            },
            _ => part.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_rewrite_leaves_operators() {
        assert_eq!(
            rewrite_condition("date >= TODAY-7 AND date <= TODAY", wednesday()),
            "date >= '2024-01-03' AND date <= '2024-01-10'"
        );
    }

    #[test]
    fn test_rewrite_ignores_lookalikes() {
        let condition = "label = TODAYS OR x = MY_TODAY OR y = WEEK_START_AT OR z = TODAY-7x";
        assert_eq!(rewrite_condition(condition, wednesday()), condition);
    }

    #[test]
    fn test_rewrite_keeps_literals_and_lowercase() {
        let condition = "created = 2024-01-01 OR note = 'today'";
        assert_eq!(rewrite_condition(condition, wednesday()), condition);
    }

    #[test]
    fn test_rewrite_already_quoted() {
        assert_eq!(
            rewrite_condition("due = 'MONTH_END'", wednesday()),
            "due = '2024-01-31'"
        );
    }

    #[test]
    fn test_rewrite_unresolvable_token_left_in_place() {
        assert_eq!(
            rewrite_condition(
                "a >= TODAY-99999999999999 AND b <= TODAY",
                wednesday()
            ),
            "a >= TODAY-99999999999999 AND b <= '2024-01-10'"
        );
    }

    #[test]
    fn test_rewrite_adjacent_punctuation() {
        assert_eq!(
            rewrite_condition("(WEEK_START,WEEK_END)", wednesday()),
            "('2024-01-08','2024-01-14')"
        );
    }

    #[test]
    fn test_split_separators() {
        assert_eq!(
            split_list_expression("TODAY and TOMORROW AND 2024-02-01 , , opaque", wednesday()),
            vec!["2024-01-10", "2024-01-11", "2024-02-01", "opaque"]
        );
    }

    #[test]
    fn test_split_keeps_words_containing_and() {
        assert_eq!(
            split_list_expression("BRAND, HANDOVER", wednesday()),
            vec!["BRAND", "HANDOVER"]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_list_expression("  ,  ", wednesday()).is_empty());
    }
}
