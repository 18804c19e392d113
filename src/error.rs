use std::fmt;

use thiserror::Error;

use crate::plot::Axis;
use crate::processing::FilterOperator;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for filter evaluation and axis preparation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Convenience result type for viewer configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type returned by ingestion functions.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input bytes are not valid in the requested text encoding.
    #[error("decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The input does not conform to the expected shape (missing columns, unknown extension,
    /// etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Which caller-supplied input an evaluation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// A filter condition, by its 0-based position in the applied [`crate::processing::FilterSet`].
    Condition {
        index: usize,
        operator: FilterOperator,
    },
    /// A plot axis selection.
    Axis(Axis),
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition { index, operator } => {
                write!(f, "filter #{} '{}'", index + 1, operator)
            }
            Self::Axis(axis) => write!(f, "{axis}"),
        }
    }
}

/// Errors raised while evaluating filters or preparing plot axes.
///
/// Both kinds are user-input errors: evaluation stops at the first one and nothing is partially
/// applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A condition or axis names a column that the dataset does not have.
    #[error("column '{column}' not found ({origin})")]
    ColumnNotFound { column: String, origin: ErrorOrigin },

    /// A comparison value is not a number, or the column cannot be read as numbers.
    #[error("cannot convert value for column '{column}' ({origin}): {message} (raw='{raw}')")]
    ValueConversion {
        column: String,
        raw: String,
        message: String,
        origin: ErrorOrigin,
    },
}

impl FilterError {
    /// The input that caused the error.
    pub fn origin(&self) -> ErrorOrigin {
        match self {
            Self::ColumnNotFound { origin, .. } | Self::ValueConversion { origin, .. } => *origin,
        }
    }
}

/// Errors raised while loading or interpreting a [`crate::config::ViewerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The config is not valid JSON or has the wrong shape (including unknown operators).
    #[error("invalid viewer config: {0}")]
    Json(#[from] serde_json::Error),

    /// More filter rows were supplied than a single interaction allows.
    #[error("too many filters: {count} supplied, at most {max} allowed")]
    TooManyFilters { count: usize, max: usize },
}
