//! Condition builder for backend queries.

use chrono::NaiveDate;
use chrono::SecondsFormat;
use log::warn;
use rust_decimal::Decimal;

use crate::dates::DATE_FORMAT;
use crate::dates::DateVariable;
use crate::dates::ReferenceDate;
use crate::dates::format_date;
use crate::dates::rewrite_condition;
use crate::dates::split_list_expression;
use crate::error::DateError;
use crate::model::Value;

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A concrete value, rendered as a literal.
    Value(Value),
    /// A symbolic date, rendered as its token until resolved.
    Date(DateVariable),
}

impl Operand {
    /// Parses a date token (`WEEK_START`, `TODAY-7`, `2024-01-31`, ...).
    pub fn date(token: &str) -> Result<Self, DateError> {
        Ok(Operand::Date(token.parse()?))
    }

    fn render(&self, today: Option<NaiveDate>) -> String {
        match self {
            Operand::Value(value) => value_to_literal(value),
            Operand::Date(DateVariable::Literal(date)) => quote(&format_date(*date)),
            Operand::Date(variable) => {
                let Some(today) = today else {
                    return variable.to_string();
                };
                match variable.resolve_from(today) {
                    Some(date) => quote(&format_date(date)),
                    None => {
                        warn!("Date variable '{}' is out of range, leaving it unresolved", variable);
                        variable.to_string()
                    }
                }
            }
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<DateVariable> for Operand {
    fn from(variable: DateVariable) -> Self {
        Operand::Date(variable)
    }
}

macro_rules! operand_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Value(Value::from(v))
                }
            }
        )*
    };
}

operand_from_value!(bool, i32, i64, f64, Decimal, NaiveDate, String, &str);

/// A filter condition sent to the backend.
///
/// Conditions render to the backend's SQL-like syntax. Date operands stay
/// symbolic in [`Condition::render`], which is what a saved filter stores,
/// and become quoted `YYYY-MM-DD` literals in [`Condition::resolve`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dashboard_lib::dates::DateVariable;
/// use dashboard_lib::query::Condition;
///
/// let condition = Condition::eq("status", "confirmed")
///     .and_also(Condition::ge("starts_at", DateVariable::WeekStart));
///
/// assert_eq!(
///     condition.render(),
///     "(status = 'confirmed' AND starts_at >= WEEK_START)"
/// );
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(
///     condition.resolve(today),
///     "(status = 'confirmed' AND starts_at >= '2024-01-08')"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field = value`
    Eq(String, Operand),
    /// `field <> value`
    Ne(String, Operand),
    /// `field > value`
    Gt(String, Operand),
    /// `field >= value`
    Ge(String, Operand),
    /// `field < value`
    Lt(String, Operand),
    /// `field <= value`
    Le(String, Operand),
    /// `field LIKE '%text%'`
    Contains(String, String),
    /// `field BETWEEN low AND high`
    Between(String, Operand, Operand),
    /// `field IN (a, b, ...)`
    In(String, Vec<Operand>),
    /// `field IS NULL`
    IsNull(String),
    /// `field IS NOT NULL`
    IsNotNull(String),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    /// Raw condition text, passed through. Date tokens inside it are
    /// rewritten by [`Condition::resolve`].
    Raw(String),
}

impl Condition {
    pub fn eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Condition::Eq(field.into(), value.into())
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Condition::Ne(field.into(), value.into())
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Condition::Gt(field.into(), value.into())
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Condition::Ge(field.into(), value.into())
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Condition::Lt(field.into(), value.into())
    }

    pub fn le(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Condition::Le(field.into(), value.into())
    }

    pub fn contains(field: impl Into<String>, text: impl Into<String>) -> Self {
        Condition::Contains(field.into(), text.into())
    }

    pub fn between(
        field: impl Into<String>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        Condition::Between(field.into(), low.into(), high.into())
    }

    pub fn in_list<T: Into<Operand>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Condition::In(field.into(), values.into_iter().map(Into::into).collect())
    }

    /// Builds an `IN` condition from a user-typed list such as
    /// `"TODAY, YESTERDAY, 2024-01-01"`.
    ///
    /// The list is split with [`split_list_expression`], so date tokens are
    /// resolved against `today`. Dates become date literals, whole numbers
    /// become numbers, anything else is a string.
    pub fn in_list_expr(
        field: impl Into<String>,
        expression: &str,
        today: impl ReferenceDate,
    ) -> Self {
        let values = split_list_expression(expression, today)
            .into_iter()
            .map(|part| {
                if let Ok(date) = NaiveDate::parse_from_str(&part, DATE_FORMAT) {
                    Value::Date(date)
                } else if let Ok(n) = part.parse::<i64>() {
                    Value::Long(n)
                } else {
                    Value::String(part)
                }
            });
        Condition::in_list(field, values)
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Condition::IsNull(field.into())
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Condition::IsNotNull(field.into())
    }

    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(conditions.into_iter().collect())
    }

    pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(conditions.into_iter().collect())
    }

    pub fn raw(condition: impl Into<String>) -> Self {
        Condition::Raw(condition.into())
    }

    /// Combines this condition with another using `AND`.
    pub fn and_also(self, other: Condition) -> Self {
        match self {
            Condition::And(mut conditions) => {
                conditions.push(other);
                Condition::And(conditions)
            }
            _ => Condition::And(vec![self, other]),
        }
    }

    /// Combines this condition with another using `OR`.
    pub fn or_else(self, other: Condition) -> Self {
        match self {
            Condition::Or(mut conditions) => {
                conditions.push(other);
                Condition::Or(conditions)
            }
            _ => Condition::Or(vec![self, other]),
        }
    }

    /// Renders the condition with date variables left as tokens.
    pub fn render(&self) -> String {
        self.render_with(None)
    }

    /// Renders the condition with every date variable resolved against
    /// `today`, including tokens inside raw fragments.
    ///
    /// String values are never rewritten, so `note = 'TODAY'` stays as is.
    pub fn resolve(&self, today: impl ReferenceDate) -> String {
        self.render_with(Some(today.reference_date()))
    }

    fn render_with(&self, today: Option<NaiveDate>) -> String {
        match self {
            Condition::Eq(field, value) => compare(field, "=", value, today),
            Condition::Ne(field, value) => compare(field, "<>", value, today),
            Condition::Gt(field, value) => compare(field, ">", value, today),
            Condition::Ge(field, value) => compare(field, ">=", value, today),
            Condition::Lt(field, value) => compare(field, "<", value, today),
            Condition::Le(field, value) => compare(field, "<=", value, today),
            Condition::Contains(field, text) => {
                format!("{} LIKE {}", field, quote(&format!("%{}%", text)))
            }
            Condition::Between(field, low, high) => format!(
                "{} BETWEEN {} AND {}",
                field,
                low.render(today),
                high.render(today)
            ),
            Condition::In(field, values) => {
                if values.is_empty() {
                    return "1 = 0".to_string();
                }
                let parts: Vec<_> = values.iter().map(|v| v.render(today)).collect();
                format!("{} IN ({})", field, parts.join(", "))
            }
            Condition::IsNull(field) => format!("{} IS NULL", field),
            Condition::IsNotNull(field) => format!("{} IS NOT NULL", field),
            Condition::And(conditions) => join(conditions, " AND ", today),
            Condition::Or(conditions) => join(conditions, " OR ", today),
            Condition::Raw(raw) => match today {
                Some(today) => rewrite_condition(raw, today),
                None => raw.clone(),
            },
        }
    }
}

fn compare(field: &str, op: &str, value: &Operand, today: Option<NaiveDate>) -> String {
    format!("{} {} {}", field, op, value.render(today))
}

fn join(conditions: &[Condition], separator: &str, today: Option<NaiveDate>) -> String {
    let parts: Vec<_> = conditions
        .iter()
        .map(|c| c.render_with(today))
        .filter(|part| !part.is_empty())
        .collect();
    match parts.len() {
        0 => String::new(),
        1 => parts.into_iter().collect(),
        _ => format!("({})", parts.join(separator)),
    }
}

/// Quotes a string literal, doubling embedded single quotes.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn value_to_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Long(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Date(d) => quote(&format_date(*d)),
        Value::DateTime(dt) => quote(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Value::String(s) => quote(s),
        Value::Json(json) => quote(&json.to_string()),
    }
}
