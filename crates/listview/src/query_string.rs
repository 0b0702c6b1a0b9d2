//! URL query-string parameters.
//!
//! The committed search text is mirrored into the page URL so a view can be
//! bookmarked or shared. [`QueryParams`] keeps the parameters in their
//! original order and only touches the one it is asked to change.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Ordered `application/x-www-form-urlencoded` parameters.
///
/// ```
/// use listview::QueryParams;
///
/// let mut params = QueryParams::parse("?tab=payroll&search=old");
/// params.set("search", "new value");
/// assert_eq!(params.to_string(), "tab=payroll&search=new+value");
///
/// params.remove("search");
/// assert_eq!(params.to_url_suffix(), "?tab=payroll");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Parses a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        QueryParams {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replaces the value of `name` in place, or appends it.
    ///
    /// Repeated occurrences collapse into the first one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(key, _)| key == name) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(key, _)| {
                    let keep = index <= first || key != name;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((name.to_string(), value)),
        }
    }

    /// Removes every occurrence of `name`. Returns whether any existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(key, _)| key != name);
        self.pairs.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encoded form prefixed with `?`, or empty when there are no parameters.
    pub fn to_url_suffix(&self) -> String {
        if self.pairs.is_empty() {
            String::new()
        } else {
            format!("?{self}")
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

impl FromStr for QueryParams {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(QueryParams::parse(s))
    }
}
