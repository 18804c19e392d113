//! Row filtering for [`crate::types::DataSet`].
//!
//! [`filter()`] keeps rows matching an arbitrary predicate. [`evaluate()`] applies a
//! [`FilterSet`] of user-entered conditions one after another, each condition narrowing the
//! dataset produced by the previous one.

use log::{debug, warn};

use crate::error::{ErrorOrigin, FilterError, FilterResult};
use crate::types::{parse_bool, DataSet, DataType, Value, NULL_VALUE};

use super::condition::{FilterCondition, FilterOperator, FilterSet};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Apply every condition of `filters` to `dataset`, in set order.
///
/// Each condition sees only the rows that survived the conditions before it. The result has the
/// same schema as `dataset` and keeps the relative order of surviving rows; `dataset` itself is
/// not modified.
///
/// Operators:
///
/// - [`FilterOperator::Equals`]: typed equality chosen by the column's [`DataType`]. If the raw
///   value does not parse as that type, the cell's `Display` form is compared instead.
/// - [`FilterOperator::Contains`]: case-insensitive substring match on [`Value::text_form`], so
///   `3.0` in a float column matches `"3.0"` and null cells match `"nan"`.
/// - [`FilterOperator::GreaterThan`] / [`FilterOperator::LessThan`]: the raw value must parse
///   as a float and the column must be numeric (`Int64`, `Float64`, or `Bool` as 0/1). Null
///   cells never match.
///
/// # Errors
///
/// Stops at the first failing condition and returns [`FilterError::ColumnNotFound`] or
/// [`FilterError::ValueConversion`] tagged with that condition's position.
///
/// # Examples
///
/// ```rust
/// use tabular_lens::processing::{evaluate, FilterCondition, FilterOperator, FilterSet};
/// use tabular_lens::types::{DataSet, DataType, Field, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(vec![Field::new("age", DataType::Int64)]),
///     vec![vec![Value::Int64(3)], vec![Value::Int64(12)], vec![Value::Int64(20)]],
/// );
/// let filters = FilterSet::from_conditions([
///     FilterCondition::new("age", FilterOperator::GreaterThan, "10"),
/// ]);
///
/// let out = evaluate(&ds, &filters).unwrap();
/// assert_eq!(out.rows, vec![vec![Value::Int64(12)], vec![Value::Int64(20)]]);
/// ```
pub fn evaluate(dataset: &DataSet, filters: &FilterSet) -> FilterResult<DataSet> {
    let mut current = dataset.clone();
    for (index, condition) in filters.iter().enumerate() {
        let before = current.row_count();
        current = apply_condition(&current, index, condition).inspect_err(|e| {
            warn!("filter evaluation aborted: {e}");
        })?;
        debug!(
            "filter #{} column='{}' op='{}' value='{}': {} -> {} rows",
            index + 1,
            condition.column,
            condition.operator,
            condition.raw_value,
            before,
            current.row_count()
        );
    }
    Ok(current)
}

fn apply_condition(
    dataset: &DataSet,
    index: usize,
    condition: &FilterCondition,
) -> FilterResult<DataSet> {
    let origin = ErrorOrigin::Condition {
        index,
        operator: condition.operator,
    };
    let col_idx =
        dataset
            .schema
            .index_of(&condition.column)
            .ok_or_else(|| FilterError::ColumnNotFound {
                column: condition.column.clone(),
                origin,
            })?;
    let data_type = dataset.schema.fields[col_idx].data_type;
    let matcher = Matcher::compile(condition, data_type, origin)?;

    Ok(dataset.filter_rows(|row| matcher.matches(row.get(col_idx).unwrap_or(&NULL_VALUE))))
}

/// A condition resolved against one column's type tag.
enum Matcher {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    ContainsCaseless(String),
    Greater(f64),
    Less(f64),
}

impl Matcher {
    fn compile(
        condition: &FilterCondition,
        data_type: DataType,
        origin: ErrorOrigin,
    ) -> FilterResult<Self> {
        let raw = condition.raw_value.as_str();
        match condition.operator {
            FilterOperator::Equals => Ok(compile_equals(raw, data_type)),
            FilterOperator::Contains => Ok(Self::ContainsCaseless(raw.to_lowercase())),
            FilterOperator::GreaterThan | FilterOperator::LessThan => {
                let conversion_error = |message: String| FilterError::ValueConversion {
                    column: condition.column.clone(),
                    raw: raw.to_string(),
                    message,
                    origin,
                };
                let threshold = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| conversion_error(format!("expected a number: {e}")))?;
                if !data_type.is_numeric() {
                    return Err(conversion_error(format!(
                        "column type {data_type:?} is not numeric"
                    )));
                }
                Ok(match condition.operator {
                    FilterOperator::GreaterThan => Self::Greater(threshold),
                    _ => Self::Less(threshold),
                })
            }
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Int(wanted) => match value {
                Value::Int64(v) => v == wanted,
                _ => false,
            },
            Self::Float(wanted) => value.as_f64().is_some_and(|v| v == *wanted),
            Self::Bool(wanted) => matches!(value, Value::Bool(v) if v == wanted),
            Self::Text(wanted) => value.to_string() == *wanted,
            Self::ContainsCaseless(needle) => value.text_form().to_lowercase().contains(needle),
            Self::Greater(threshold) => value.as_f64().is_some_and(|v| v > *threshold),
            Self::Less(threshold) => value.as_f64().is_some_and(|v| v < *threshold),
        }
    }
}

fn compile_equals(raw: &str, data_type: DataType) -> Matcher {
    let trimmed = raw.trim();
    let typed = match data_type {
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Matcher::Int)
            .ok()
            .or_else(|| trimmed.parse::<f64>().ok().map(Matcher::Float)),
        DataType::Float64 => trimmed.parse::<f64>().ok().map(Matcher::Float),
        DataType::Bool => parse_bool(trimmed).map(Matcher::Bool),
        DataType::Utf8 => None,
    };
    typed.unwrap_or_else(|| Matcher::Text(raw.to_string()))
}
