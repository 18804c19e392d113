//! Turning two selected columns into data for a scatter plot.
//!
//! Drawing is left to the caller's charting library. This module only extracts the axis columns
//! and, for axes shown on a logarithmic scale, runs them through
//! [`crate::processing::sanitize`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorOrigin, FilterError, FilterResult};
use crate::processing::sanitize;
use crate::types::{DataSet, Value};

/// Plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x axis"),
            Self::Y => f.write_str("y axis"),
        }
    }
}

/// Which columns to plot and which axes use a logarithmic scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub log_x: bool,
    #[serde(default)]
    pub log_y: bool,
}

impl AxisSelection {
    /// Linear axes for `x` and `y`.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            log_x: false,
            log_y: false,
        }
    }

    /// Set the log-scale flags.
    pub fn with_log(mut self, log_x: bool, log_y: bool) -> Self {
        self.log_x = log_x;
        self.log_y = log_y;
        self
    }
}

/// Values for one axis.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisData {
    /// Numbers. Bools map to `0.0`/`1.0` and nulls to NaN on linear axes.
    Numeric(Vec<f64>),
    /// Category labels for text columns.
    Text(Vec<String>),
}

impl AxisData {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a charting library needs to draw the scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    /// `"<y> vs <x>"`.
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: AxisData,
    pub y: AxisData,
    pub log_x: bool,
    pub log_y: bool,
}

/// Extract the selected columns of `dataset` as plot data.
///
/// Log-scaled axes are sanitized independently, so they may end up shorter than the other axis
/// when non-finite values are dropped.
///
/// # Errors
///
/// - [`FilterError::ColumnNotFound`] if an axis column is not in `dataset`.
/// - [`FilterError::ValueConversion`] if a log-scaled axis is a text column.
pub fn prepare_scatter(dataset: &DataSet, selection: &AxisSelection) -> FilterResult<ScatterSeries> {
    let x = axis_data(dataset, &selection.x, selection.log_x, Axis::X)?;
    let y = axis_data(dataset, &selection.y, selection.log_y, Axis::Y)?;
    Ok(ScatterSeries {
        title: format!("{} vs {}", selection.y, selection.x),
        x_label: selection.x.clone(),
        y_label: selection.y.clone(),
        x,
        y,
        log_x: selection.log_x,
        log_y: selection.log_y,
    })
}

fn axis_data(dataset: &DataSet, column: &str, log_scale: bool, axis: Axis) -> FilterResult<AxisData> {
    let origin = ErrorOrigin::Axis(axis);
    let data_type = dataset
        .schema
        .field(column)
        .map(|f| f.data_type)
        .ok_or_else(|| FilterError::ColumnNotFound {
            column: column.to_string(),
            origin,
        })?;
    let values = dataset.column(column).unwrap_or_default();

    if log_scale {
        if !data_type.is_numeric() {
            return Err(FilterError::ValueConversion {
                column: column.to_string(),
                raw: format!("{data_type:?}"),
                message: "log scale requires a numeric column".to_string(),
                origin,
            });
        }
        return Ok(AxisData::Numeric(sanitize(&numeric(&values))));
    }

    if !data_type.is_numeric() {
        return Ok(AxisData::Text(values.iter().map(|v| v.to_string()).collect()));
    }
    Ok(AxisData::Numeric(numeric(&values)))
}

fn numeric(values: &[&Value]) -> Vec<f64> {
    values.iter().map(|v| v.as_f64().unwrap_or(f64::NAN)).collect()
}
