//! Sort specification and value ordering.
//!
//! A [`SortSpec`] is an ordered list of [`SortKey`]s. The first key is the
//! primary sort, later keys break ties. An empty spec keeps input order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Next state when a header is clicked: asc → desc → unsorted.
    pub fn cycle(current: Option<SortDirection>) -> Option<SortDirection> {
        match current {
            None => Some(SortDirection::Asc),
            Some(SortDirection::Asc) => Some(SortDirection::Desc),
            Some(SortDirection::Desc) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(column, direction)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: impl Into<String>) -> Self {
        SortKey {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        SortKey {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Compares two field values under this key's direction. Missing
    /// values (and NaN) stay last either way.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        match (a.is_missing(), b.is_missing()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => compare_values(a, b),
            (false, false) => self.direction.apply(compare_values(a, b)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.direction)
    }
}

/// Parses `column` or `column:asc` / `column:desc`.
impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.rsplit_once(':') {
            Some((column, "asc")) => (column, SortDirection::Asc),
            Some((column, "desc")) => (column, SortDirection::Desc),
            Some((_, other)) => return Err(format!("unknown sort direction '{other}'")),
            None => (s, SortDirection::Asc),
        };
        if column.is_empty() {
            return Err("empty sort column".to_string());
        }
        Ok(SortKey {
            column: column.to_string(),
            direction,
        })
    }
}

/// Ordered sequence of sort keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec(Vec<SortKey>);

impl SortSpec {
    pub fn new() -> Self {
        SortSpec::default()
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Current direction of `column`, if it takes part in the sort.
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.0
            .iter()
            .find(|key| key.column == column)
            .map(|key| key.direction)
    }

    pub fn then(mut self, key: SortKey) -> Self {
        self.push(key);
        self
    }

    /// Adds a key, replacing any existing key on the same column in place.
    pub fn push(&mut self, key: SortKey) {
        match self.0.iter_mut().find(|k| k.column == key.column) {
            Some(existing) => existing.direction = key.direction,
            None => self.0.push(key),
        }
    }

    /// Advances `column` one step through asc → desc → unsorted.
    ///
    /// Without `additive` the result is a single-column sort (or no sort).
    /// With `additive` the other keys are kept and the column is cycled in
    /// place, appended when new, or dropped when it cycles out.
    pub fn toggle(&mut self, column: &str, additive: bool) {
        let next = SortDirection::cycle(self.direction_of(column));

        if !additive {
            self.0.clear();
            if let Some(direction) = next {
                self.0.push(SortKey {
                    column: column.to_string(),
                    direction,
                });
            }
            return;
        }

        match next {
            Some(direction) => self.push(SortKey {
                column: column.to_string(),
                direction,
            }),
            None => self.0.retain(|key| key.column != column),
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Compares two records key by key.
    pub fn compare<T, F>(&self, a: &T, b: &T, accessor: &F) -> Ordering
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        for key in &self.0 {
            let val_a = accessor(a, key.column.as_str());
            let val_b = accessor(b, key.column.as_str());

            let ordering = key.compare(&val_a, &val_b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl FromIterator<SortKey> for SortSpec {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        let mut spec = SortSpec::new();
        for key in iter {
            spec.push(key);
        }
        spec
    }
}

/// Total order over field values.
///
/// Text compares case-insensitively first, then byte-wise. Values of
/// different kinds order by kind: text, numbers, timestamps, booleans,
/// then missing values.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a) | Value::Enum(a), Value::String(b) | Value::Enum(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::String(_) | Value::Enum(_) => 0,
        Value::Number(_) => 1,
        Value::Timestamp(_) => 2,
        Value::Bool(_) => 3,
        Value::None => 4,
    }
}
