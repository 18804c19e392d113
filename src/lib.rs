//! `tabular-lens` loads delimited text into a typed in-memory [`types::DataSet`], narrows it with
//! user-entered filter conditions and prepares two of its columns for a scatter plot, with
//! optional logarithmic axes.
//!
//! ## Pipeline
//!
//! 1. [`ingestion::ingest_from_path`] reads a `.csv`/`.tsv` file (ISO-8859-1 by default) and fixes
//!    one [`types::DataType`] per column.
//! 2. [`config::ViewerConfig`] carries the page state for one interaction: filter rows and the
//!    axis selection.
//! 3. [`processing::evaluate`] applies the resulting [`processing::FilterSet`] condition by
//!    condition.
//! 4. [`plot::prepare_scatter`] extracts the axis columns, running log-scaled axes through
//!    [`processing::sanitize`].
//!
//! ## Filter operators
//!
//! | operator | raw value | column types |
//! |---|---|---|
//! | `equals` | parsed as the column type, falls back to text | any |
//! | `contains` | case-insensitive substring | any (text form) |
//! | `greater than` / `less than` | must parse as a float | `Int64`, `Float64` |
//!
//! A [`processing::FilterSet`] holds at most one condition per column: a later condition on the
//! same column replaces the earlier one instead of being combined with it.
//!
//! ## Example
//!
//! ```rust
//! use tabular_lens::config::ViewerConfig;
//! use tabular_lens::plot::{prepare_scatter, AxisData};
//! use tabular_lens::processing::evaluate;
//! use tabular_lens::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("age", DataType::Int64),
//!         Field::new("income", DataType::Float64),
//!     ]),
//!     vec![
//!         vec![Value::Int64(8), Value::Float64(0.0)],
//!         vec![Value::Int64(12), Value::Float64(0.0)],
//!         vec![Value::Int64(20), Value::Float64(50.0)],
//!     ],
//! );
//!
//! let cfg = ViewerConfig::from_json_str(r#"{
//!     "filters": [{"column": "age", "operator": "greater than", "value": "10"}],
//!     "axes": {"x": "age", "y": "income", "log_y": true}
//! }"#).unwrap();
//!
//! let filtered = evaluate(&ds, &cfg.filter_set().unwrap()).unwrap();
//! let scatter = prepare_scatter(&filtered, &cfg.axes).unwrap();
//!
//! assert_eq!(scatter.title, "income vs age");
//! assert_eq!(scatter.x, AxisData::Numeric(vec![12.0, 20.0]));
//! assert_eq!(scatter.y, AxisData::Numeric(vec![5.0, 50.0]));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: delimited-text loading, type inference, observers
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: filter conditions, the filter chain evaluator, the log-scale sanitizer
//! - [`plot`]: axis selection and scatter data preparation
//! - [`config`]: caller-owned viewer state
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod ingestion;
pub mod plot;
pub mod processing;
pub mod types;

pub use error::{
    ConfigError, ConfigResult, ErrorOrigin, FilterError, FilterResult, IngestionError, IngestionResult,
};
