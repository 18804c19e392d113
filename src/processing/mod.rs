//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion and
//! never modifies its input.
//!
//! Currently implemented:
//!
//! - [`filter()`]: row filtering by predicate
//! - [`evaluate()`]: sequential application of a [`FilterSet`] of user conditions
//! - [`sanitize()`]: making a numeric series safe for a logarithmic axis
//!
//! ## Example: conditions → evaluate → sanitize
//!
//! ```rust
//! use tabular_lens::processing::{evaluate, sanitize_values, FilterCondition, FilterOperator, FilterSet};
//! use tabular_lens::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("name", DataType::Utf8),
//!     Field::new("flux", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("alpha".to_string()), Value::Float64(0.0)],
//!         vec![Value::Utf8("beta".to_string()), Value::Float64(4.0)],
//!         vec![Value::Utf8("ALPHA-2".to_string()), Value::Float64(8.0)],
//!     ],
//! );
//!
//! let filters = FilterSet::from_conditions([
//!     FilterCondition::new("name", FilterOperator::Contains, "alpha"),
//! ]);
//! let filtered = evaluate(&ds, &filters).unwrap();
//! assert_eq!(filtered.row_count(), 2);
//!
//! // 0.0 cannot go on a log axis; it is raised to a tenth of the smallest positive value.
//! let flux = filtered.column("flux").unwrap();
//! assert_eq!(sanitize_values(&flux), vec![0.8, 8.0]);
//! ```

pub mod condition;
pub mod filter;
pub mod log_scale;

pub use condition::{FilterCondition, FilterOperator, FilterSet, UnknownOperator};
pub use filter::{evaluate, filter};
pub use log_scale::{sanitize, sanitize_values, FALLBACK_MIN_POSITIVE};
