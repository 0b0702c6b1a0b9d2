//! The predicate set applied by the normalizer.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;

/// Value of a categorical filter. `All` means the filter is inactive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterValue {
    #[default]
    All,
    Only(String),
}

impl FilterValue {
    pub fn only(value: impl Into<String>) -> Self {
        FilterValue::Only(value.into())
    }

    pub fn is_active(&self) -> bool {
        matches!(self, FilterValue::Only(_))
    }

    pub fn as_only(&self) -> Option<&str> {
        match self {
            FilterValue::All => None,
            FilterValue::Only(value) => Some(value),
        }
    }
}

/// `"all"` parses as [`FilterValue::All`], anything else as `Only`.
impl FromStr for FilterValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => FilterValue::All,
            other => FilterValue::Only(other.to_string()),
        })
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::All => f.write_str("all"),
            FilterValue::Only(value) => f.write_str(value),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

/// Everything that decides whether a record is in the view.
///
/// Predicates combine conjunctively: a record must pass the search, every
/// active categorical filter, and the date range.
///
/// ```
/// use listview::{DateRange, PredicateSet};
///
/// let predicates = PredicateSet::new()
///     .search("ali")
///     .only("status", "pending")
///     .within(DateRange::Last7Days);
///
/// assert!(predicates.is_active());
/// assert_eq!(predicates.filter_value("status").as_only(), Some("pending"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredicateSet {
    /// Matched case-insensitively as a substring. Not trimmed.
    pub search_text: String,
    pub categorical: BTreeMap<String, FilterValue>,
    pub date_range: DateRange,
}

impl PredicateSet {
    pub fn new() -> Self {
        PredicateSet::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn only(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter(field, FilterValue::Only(value.into()))
    }

    pub fn filter(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.categorical.insert(field.into(), value);
        self
    }

    pub fn within(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Current value of a categorical filter. Unset filters read as `All`.
    pub fn filter_value(&self, field: &str) -> &FilterValue {
        const ALL: &FilterValue = &FilterValue::All;
        self.categorical.get(field).unwrap_or(ALL)
    }

    /// Active `(field, value)` filters in field order.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categorical
            .iter()
            .filter_map(|(field, value)| value.as_only().map(|v| (field.as_str(), v)))
    }

    /// Whether any predicate can exclude a record.
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty()
            || self.date_range.is_active()
            || self.categorical.values().any(FilterValue::is_active)
    }

    /// Resets every predicate to its inactive value, keeping the filter names.
    pub fn clear(&mut self) {
        self.search_text.clear();
        self.date_range = DateRange::All;
        for value in self.categorical.values_mut() {
            *value = FilterValue::All;
        }
    }
}
