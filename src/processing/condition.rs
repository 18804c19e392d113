//! Filter conditions and the column-deduplicated [`FilterSet`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Comparison applied by a [`FilterCondition`].
///
/// Serialized using the labels shown to users (`"equals"`, `"contains"`, `"greater than"`,
/// `"less than"`). Deserializing goes through [`FromStr`], so labels match in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum FilterOperator {
    /// Typed equality, dispatched on the column's [`crate::types::DataType`].
    #[serde(rename = "equals")]
    Equals,
    /// Case-insensitive substring match on the value's text form.
    #[serde(rename = "contains")]
    Contains,
    /// Strict numeric `>`.
    #[serde(rename = "greater than")]
    GreaterThan,
    /// Strict numeric `<`.
    #[serde(rename = "less than")]
    LessThan,
}

impl FilterOperator {
    /// All operators, in the order they are offered to users.
    pub const ALL: [FilterOperator; 4] = [
        Self::Equals,
        Self::Contains,
        Self::GreaterThan,
        Self::LessThan,
    ];

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::GreaterThan => "greater than",
            Self::LessThan => "less than",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned by [`FilterOperator::from_str`] for an unrecognised label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter operator '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for FilterOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.label() == wanted)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl TryFrom<String> for FilterOperator {
    type Error = UnknownOperator;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

/// One `(column, operator, value)` predicate.
///
/// `raw_value` is kept as entered and only coerced when the condition is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub column: String,
    pub operator: FilterOperator,
    pub raw_value: String,
}

impl FilterCondition {
    /// Create a new condition.
    pub fn new(
        column: impl Into<String>,
        operator: FilterOperator,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            raw_value: raw_value.into(),
        }
    }
}

/// Ordered collection of conditions with at most one condition per column.
///
/// Inserting a condition for a column that already has one replaces the earlier condition in
/// place: the set keeps the position of the first insertion and the operator/value of the last.
/// Same-column conditions are never combined into a conjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    conditions: Vec<FilterCondition>,
}

impl FilterSet {
    /// Maximum number of conditions a single interaction may supply.
    pub const MAX_CONDITIONS: usize = 5;

    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set by inserting `conditions` in order (last write wins per column).
    pub fn from_conditions<I>(conditions: I) -> Self
    where
        I: IntoIterator<Item = FilterCondition>,
    {
        let mut set = Self::new();
        for condition in conditions {
            set.insert(condition);
        }
        set
    }

    /// Insert a condition, replacing any existing condition on the same column.
    ///
    /// Returns the replaced condition, if any.
    pub fn insert(&mut self, condition: FilterCondition) -> Option<FilterCondition> {
        match self
            .conditions
            .iter_mut()
            .find(|c| c.column == condition.column)
        {
            Some(existing) => Some(std::mem::replace(existing, condition)),
            None => {
                self.conditions.push(condition);
                None
            }
        }
    }

    /// The condition currently held for `column`.
    pub fn get(&self, column: &str) -> Option<&FilterCondition> {
        self.conditions.iter().find(|c| c.column == column)
    }

    /// Iterate conditions in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterCondition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterCondition;
    type IntoIter = std::slice::Iter<'a, FilterCondition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<FilterCondition> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterCondition>>(iter: I) -> Self {
        Self::from_conditions(iter)
    }
}
