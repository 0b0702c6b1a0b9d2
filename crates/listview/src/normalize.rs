//! The query normalizer.
//!
//! Turns a raw collection plus a [`PredicateSet`] and [`SortSpec`] into the
//! ordered view a table renders. Evaluation order is fixed:
//!
//! ```text
//! keep = search matches
//!      ∧ every active categorical filter matches
//!      ∧ timestamp inside the date window
//! then stable sort by the sort spec
//! ```
//!
//! The normalizer is pure: it never mutates the input and the same inputs
//! (including "now") always produce the same output.

use chrono::{DateTime, FixedOffset};
use tracing::trace;

use crate::date_range::DateWindow;
use crate::ordering::SortSpec;
use crate::predicate::PredicateSet;
use crate::record::Record;
use crate::value::Value;

/// Which fields the search and date filters read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalizer {
    searchable: Vec<String>,
    timestamp_field: Option<String>,
}

impl Normalizer {
    pub fn new<I, S>(searchable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Normalizer {
            searchable: searchable.into_iter().map(Into::into).collect(),
            timestamp_field: None,
        }
    }

    pub fn with_timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self
    }

    pub fn searchable(&self) -> &[String] {
        &self.searchable
    }

    pub fn timestamp_field(&self) -> Option<&str> {
        self.timestamp_field.as_deref()
    }

    /// Filters and sorts records that implement [`Record`].
    pub fn apply<'a, T: Record>(
        &self,
        records: &'a [T],
        predicates: &PredicateSet,
        sort: &SortSpec,
        now: DateTime<FixedOffset>,
    ) -> Vec<&'a T> {
        self.apply_with(records, predicates, sort, now, T::accessor)
    }

    /// Filters and sorts using an explicit accessor function.
    pub fn apply_with<'a, T, F>(
        &self,
        records: &'a [T],
        predicates: &PredicateSet,
        sort: &SortSpec,
        now: DateTime<FixedOffset>,
        accessor: F,
    ) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        self.positions(records, predicates, sort, now, accessor)
            .into_iter()
            .map(|i| &records[i])
            .collect()
    }

    /// Like [`apply_with`](Self::apply_with) but returns indices into `records`.
    pub fn positions<T, F>(
        &self,
        records: &[T],
        predicates: &PredicateSet,
        sort: &SortSpec,
        now: DateTime<FixedOffset>,
        accessor: F,
    ) -> Vec<usize>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let matcher = Matcher::new(self, predicates, now);

        let mut kept: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, item)| matcher.matches(*item, &accessor))
            .map(|(i, _)| i)
            .collect();

        if !sort.is_empty() {
            // sort_by is stable: equal keys keep filter-pass order
            kept.sort_by(|&a, &b| sort.compare(&records[a], &records[b], &accessor));
        }

        trace!(
            total = records.len(),
            kept = kept.len(),
            sort_keys = sort.keys().len(),
            "normalized view"
        );
        kept
    }

    /// Tests a single record against the predicates.
    pub fn matches<T, F>(
        &self,
        item: &T,
        predicates: &PredicateSet,
        now: DateTime<FixedOffset>,
        accessor: F,
    ) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        Matcher::new(self, predicates, now).matches(item, &accessor)
    }
}

/// Predicates with per-run work done up front.
struct Matcher<'p> {
    normalizer: &'p Normalizer,
    needle: Option<String>,
    filters: Vec<(&'p str, &'p str)>,
    window: Option<DateWindow>,
}

impl<'p> Matcher<'p> {
    fn new(
        normalizer: &'p Normalizer,
        predicates: &'p PredicateSet,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let needle = (!predicates.search_text.is_empty())
            .then(|| predicates.search_text.to_lowercase());

        Matcher {
            normalizer,
            needle,
            filters: predicates.active_filters().collect(),
            window: predicates.date_range.window(now),
        }
    }

    fn matches<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        self.matches_search(item, accessor)
            && self.matches_filters(item, accessor)
            && self.matches_date(item, accessor)
    }

    fn matches_search<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let Some(needle) = &self.needle else {
            return true;
        };
        self.normalizer.searchable.iter().any(|field| {
            accessor(item, field.as_str())
                .search_text()
                .is_some_and(|text| text.to_lowercase().contains(needle.as_str()))
        })
    }

    fn matches_filters<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        self.filters.iter().all(|&(field, expected)| {
            accessor(item, field)
                .category()
                .is_some_and(|actual| actual == expected)
        })
    }

    fn matches_date<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let Some(window) = self.window else {
            return true;
        };
        let ts = self
            .normalizer
            .timestamp_field
            .as_deref()
            .and_then(|field| accessor(item, field).as_timestamp());
        ts.is_some_and(|ts| window.contains(ts))
    }
}
