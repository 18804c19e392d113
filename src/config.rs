//! Viewer state supplied by the presentation layer.
//!
//! A [`ViewerConfig`] holds what the user has entered on the page: up to
//! [`FilterSet::MAX_CONDITIONS`] filter rows and the plot axis selection. The crate keeps no state
//! of its own; callers rebuild the config on every interaction and pass it in.
//!
//! ```rust
//! use tabular_lens::config::ViewerConfig;
//!
//! let cfg = ViewerConfig::from_json_str(r#"{
//!     "filters": [
//!         {"column": "age", "operator": "greater than", "value": "10"},
//!         {"column": "name", "operator": "contains", "value": ""}
//!     ],
//!     "axes": {"x": "age", "y": "income", "log_y": true}
//! }"#).unwrap();
//!
//! // The second row has no value yet and is skipped.
//! assert_eq!(cfg.filter_set().unwrap().len(), 1);
//! assert!(cfg.axes.log_y);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::plot::AxisSelection;
use crate::processing::{FilterCondition, FilterOperator, FilterSet};

/// One row of the filter form, possibly not filled in yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRow {
    #[serde(default)]
    pub column: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
}

impl FilterRow {
    /// Rows with an empty column or value are ignored.
    pub fn is_complete(&self) -> bool {
        !self.column.is_empty() && !self.value.is_empty()
    }
}

/// Page state for one interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub filters: Vec<FilterRow>,
    #[serde(default)]
    pub axes: AxisSelection,
}

impl ViewerConfig {
    /// Parse a config from JSON.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build the [`FilterSet`] for this interaction.
    ///
    /// Incomplete rows are skipped and rows on an already-used column replace the earlier row.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TooManyFilters`] if more than [`FilterSet::MAX_CONDITIONS`] rows were
    /// supplied, whether or not they are complete.
    pub fn filter_set(&self) -> ConfigResult<FilterSet> {
        if self.filters.len() > FilterSet::MAX_CONDITIONS {
            return Err(ConfigError::TooManyFilters {
                count: self.filters.len(),
                max: FilterSet::MAX_CONDITIONS,
            });
        }
        Ok(self
            .filters
            .iter()
            .filter(|row| row.is_complete())
            .map(|row| FilterCondition::new(&row.column, row.operator, &row.value))
            .collect())
    }
}
