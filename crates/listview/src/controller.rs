//! The view state controller.
//!
//! [`ViewController`] owns a record collection and the interactive state of
//! one table. Every mutation keeps the state consistent before returning:
//!
//! - changing a predicate (search, categorical filter, date range) resets
//!   the page cursor and drops selected rows that fell out of the view
//! - typed search is debounced; only the committed value filters rows
//! - sorting never moves the cursor except to keep it on a page with rows
//! - page navigation clamps instead of failing
//!
//! Contract violations (unknown columns, page sizes outside the allowed
//! set) are reported as [`ViewError`]s and leave the state untouched.

use std::collections::HashSet;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::ViewConfig;
use crate::date_range::DateRange;
use crate::debounce::Debouncer;
use crate::error::{Result, ViewError};
use crate::normalize::Normalizer;
use crate::ordering::SortSpec;
use crate::pagination::PageSummary;
use crate::predicate::{FilterValue, PredicateSet};
use crate::query_string::QueryParams;
use crate::record::{Record, RecordKey};
use crate::selection::CheckState;
use crate::state::{PageRow, ViewSnapshot, ViewState};

/// Interactive list view over records of type `T`.
///
/// # Example
///
/// ```
/// use listview::{Column, Record, RecordKey, Value, ViewConfig, ViewController};
///
/// struct Employee {
///     id: u32,
///     name: String,
/// }
///
/// impl Record for Employee {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             _ => Value::None,
///         }
///     }
///
///     fn key(&self) -> RecordKey {
///         RecordKey::new(self.id.to_string())
///     }
/// }
///
/// let config = ViewConfig::new([Column::new("name")]).with_searchable(["name"]);
/// let records = vec![
///     Employee { id: 1, name: "Alice".into() },
///     Employee { id: 2, name: "Bob".into() },
/// ];
///
/// let mut view = ViewController::new(records, config).unwrap();
/// view.set_search_text("ali");
/// view.flush_search();
///
/// let snapshot = view.view();
/// assert_eq!(snapshot.rows.len(), 1);
/// assert_eq!(snapshot.rows[0].record.name, "Alice");
/// ```
pub struct ViewController<T, C: Clock = SystemClock> {
    records: Vec<T>,
    keys: Vec<RecordKey>,
    filtered: Vec<usize>,
    config: ViewConfig,
    normalizer: Normalizer,
    state: ViewState,
    search: Debouncer<String>,
    query: QueryParams,
    clock: C,
}

impl<T: Record> ViewController<T, SystemClock> {
    pub fn new(records: Vec<T>, config: ViewConfig) -> Result<Self> {
        ViewController::with_clock(records, config, SystemClock)
    }
}

impl<T: Record, C: Clock> ViewController<T, C> {
    /// Creates a controller that reads time from `clock`.
    pub fn with_clock(records: Vec<T>, config: ViewConfig, clock: C) -> Result<Self> {
        config.validate()?;

        let keys = records.iter().map(Record::key).collect();
        let mut controller = ViewController {
            records,
            keys,
            filtered: Vec::new(),
            normalizer: config.normalizer(),
            state: ViewState::from_config(&config),
            search: Debouncer::new(config.debounce()),
            query: QueryParams::new(),
            config,
            clock,
        };
        controller.recompute();
        Ok(controller)
    }

    /// Seeds the view from a URL query string.
    ///
    /// The search parameter, when present, becomes both the search box
    /// contents and the committed search without waiting for the debounce.
    /// Other parameters are kept and written back untouched. An empty
    /// search parameter is dropped.
    pub fn with_query_string(mut self, query: &str) -> Self {
        self.query = QueryParams::parse(query);
        if let Some(text) = self.query.get(&self.config.search_param) {
            let text = text.to_string();
            if text.is_empty() {
                self.query.remove(&self.config.search_param);
                return self;
            }
            debug!(search = %text, "search seeded from query string");
            self.state.search_input = text.clone();
            self.state.predicates.search_text = text;
            self.state.pagination.page_index = 0;
            self.recompute();
            self.prune_selection();
        }
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// All rows that pass the predicates, in sorted order.
    pub fn filtered(&self) -> Vec<&T> {
        self.filtered.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// What the search box shows.
    pub fn search_input(&self) -> &str {
        &self.state.search_input
    }

    /// The search text rows are currently filtered by.
    pub fn search_text(&self) -> &str {
        &self.state.predicates.search_text
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn predicates(&self) -> &PredicateSet {
        &self.state.predicates
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.state.sort
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// Current query string, `?`-prefixed, or empty.
    pub fn query_string(&self) -> String {
        self.query.to_url_suffix()
    }

    pub fn summary(&self) -> PageSummary {
        self.state.pagination.summary(self.filtered.len())
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Records a keystroke. The text reaches the filter one quiet period
    /// after the last call.
    pub fn set_search_text(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        self.state.search_input = raw.clone();
        self.search.schedule(raw, self.clock.instant());
    }

    /// Commits pending search text whose quiet period has elapsed.
    ///
    /// Call this from the event loop. Returns true if the view changed.
    pub fn poll(&mut self) -> bool {
        match self.search.poll(self.clock.instant()) {
            Some(text) => self.commit_search(text),
            None => false,
        }
    }

    /// Commits pending search text immediately.
    pub fn flush_search(&mut self) -> bool {
        match self.search.flush() {
            Some(text) => self.commit_search(text),
            None => false,
        }
    }

    fn commit_search(&mut self, text: String) -> bool {
        if text == self.state.predicates.search_text {
            return false;
        }

        if text.is_empty() {
            self.query.remove(&self.config.search_param);
        } else {
            self.query.set(&self.config.search_param, text.as_str());
        }
        debug!(search = %text, "search committed");
        self.state.predicates.search_text = text;
        self.predicates_changed();
        true
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Sets a categorical filter. `"all"` (or [`FilterValue::All`]) clears it.
    pub fn set_categorical_filter(
        &mut self,
        name: &str,
        value: impl Into<FilterValue>,
    ) -> Result<()> {
        if !self.config.is_categorical(name) {
            return Err(ViewError::UnknownColumn(name.to_string()));
        }

        let value = value.into();
        debug!(filter = name, value = %value, "filter changed");
        self.state
            .predicates
            .categorical
            .insert(name.to_string(), value);
        self.predicates_changed();
        Ok(())
    }

    pub fn set_date_range(&mut self, range: DateRange) -> Result<()> {
        if range.is_active() && self.config.timestamp_field.is_none() {
            return Err(ViewError::invalid_config(
                "date-range filter requires a timestamp_field",
            ));
        }

        debug!(range = %range, "date range changed");
        self.state.predicates.date_range = range;
        self.predicates_changed();
        Ok(())
    }

    /// Resets search, categorical filters and the date range in one step.
    pub fn clear_all_filters(&mut self) {
        self.search.cancel();
        self.state.search_input.clear();
        self.state.predicates.clear();
        self.query.remove(&self.config.search_param);
        debug!("all filters cleared");
        self.predicates_changed();
    }

    /// Re-evaluates the view against the current time.
    ///
    /// Relative date windows move as time passes; long-lived views call
    /// this to pick that up.
    pub fn refresh(&mut self) {
        self.recompute();
        self.reset_page_if_out_of_range();
        self.prune_selection();
    }

    fn predicates_changed(&mut self) {
        self.state.pagination.page_index = 0;
        self.recompute();
        self.prune_selection();
        debug!(
            total = self.filtered.len(),
            "page reset after predicate change"
        );
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Header click: cycles `column` through ascending, descending and
    /// unsorted, replacing any other sort.
    pub fn set_sort(&mut self, column: &str) -> Result<()> {
        self.toggle_sort(column, false)
    }

    /// Modifier-click: cycles `column` while keeping the other sort keys.
    pub fn set_sort_additive(&mut self, column: &str) -> Result<()> {
        self.toggle_sort(column, true)
    }

    fn toggle_sort(&mut self, column: &str, additive: bool) -> Result<()> {
        self.state.columns.sortable(column)?;
        self.state.sort.toggle(column, additive);
        debug!(column, additive, sort = ?self.state.sort.keys(), "sort changed");
        self.sort_changed();
        Ok(())
    }

    /// Replaces the whole sort spec.
    pub fn set_sort_spec(&mut self, sort: SortSpec) -> Result<()> {
        for key in sort.keys() {
            self.state.columns.sortable(&key.column)?;
        }
        debug!(sort = ?sort.keys(), "sort replaced");
        self.state.sort = sort;
        self.sort_changed();
        Ok(())
    }

    fn sort_changed(&mut self) {
        self.recompute();
        self.state.pagination.clamp(self.filtered.len());
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Moves to `index`, clamped into the valid page range.
    pub fn set_page_index(&mut self, index: usize) {
        let total = self.filtered.len();
        let pagination = &mut self.state.pagination;
        let clamped = pagination.clamp_index(index, total);
        if clamped != index {
            debug!(requested = index, page = clamped, "page index clamped");
        }
        pagination.page_index = clamped;
    }

    pub fn first_page(&mut self) {
        self.set_page_index(0);
    }

    pub fn previous_page(&mut self) {
        let index = self.state.pagination.page_index.saturating_sub(1);
        self.set_page_index(index);
    }

    pub fn next_page(&mut self) {
        let index = self.state.pagination.page_index.saturating_add(1);
        self.set_page_index(index);
    }

    pub fn last_page(&mut self) {
        let last = self.state.pagination.last_index(self.filtered.len());
        self.set_page_index(last);
    }

    /// Changes the page size. The size must be one of the configured choices.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !self.config.page_sizes.contains(&size) {
            return Err(ViewError::PageSizeNotAllowed {
                requested: size,
                allowed: self.config.page_sizes.clone(),
            });
        }

        let total = self.filtered.len();
        self.state.pagination.resize(size, total);
        debug!(
            size,
            page = self.state.pagination.page_index,
            "page size changed"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Flips selection of one row in the current view. Returns the new state.
    pub fn toggle_selection(&mut self, key: &RecordKey) -> Result<bool> {
        if !self.filtered.iter().any(|&i| &self.keys[i] == key) {
            return Err(ViewError::UnknownRecord(key.to_string()));
        }
        Ok(self.state.selection.toggle(key.clone()))
    }

    /// Header checkbox: selects every row on the current page, or clears
    /// them when they are all selected already. Rows on other pages keep
    /// their selection.
    pub fn toggle_select_all_on_page(&mut self) {
        let page_keys: Vec<RecordKey> = self
            .page_positions()
            .iter()
            .map(|&i| self.keys[i].clone())
            .collect();
        self.state.selection.toggle_group(&page_keys);
    }

    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// Tri-state of the header checkbox for the current page.
    pub fn page_check_state(&self) -> CheckState {
        let page = self.page_positions();
        self.state
            .selection
            .check_state(page.iter().map(|&i| &self.keys[i]))
    }

    pub fn is_selected(&self, key: &RecordKey) -> bool {
        self.state.selection.contains(key)
    }

    /// Selected records in view order.
    pub fn selected_records(&self) -> Vec<&T> {
        self.filtered
            .iter()
            .filter(|&&i| self.state.selection.contains(&self.keys[i]))
            .map(|&i| &self.records[i])
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.state.selection.len()
    }

    // ------------------------------------------------------------------
    // Columns
    // ------------------------------------------------------------------

    /// Returns the column's new visibility.
    pub fn toggle_column_visibility(&mut self, name: &str) -> Result<bool> {
        let visible = self.state.columns.toggle_visibility(name)?;
        debug!(column = name, visible, "column visibility toggled");
        Ok(visible)
    }

    pub fn set_column_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        if self.state.columns.set_visible(name, visible)? {
            debug!(column = name, visible, "column visibility changed");
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Data and lifecycle
    // ------------------------------------------------------------------

    /// Replaces the record collection, e.g. when a fetch resolves.
    ///
    /// Predicates and sort are kept. The cursor goes back to the first page
    /// if its page no longer has rows.
    pub fn set_records(&mut self, records: Vec<T>) {
        self.keys = records.iter().map(Record::key).collect();
        self.records = records;
        debug!(count = self.records.len(), "records replaced");
        self.refresh();
    }

    /// Cancels the pending search task. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.search.cancel() {
            debug!("pending search cancelled on teardown");
        }
    }

    /// Snapshot of the current page for rendering.
    pub fn view(&self) -> ViewSnapshot<'_, T> {
        let summary = self.summary();
        let rows = self
            .page_positions()
            .iter()
            .map(|&index| {
                let key = &self.keys[index];
                PageRow {
                    index,
                    key,
                    record: &self.records[index],
                    selected: self.state.selection.contains(key),
                }
            })
            .collect();

        ViewSnapshot {
            rows,
            summary,
            can_previous_page: summary.can_previous_page(),
            can_next_page: summary.can_next_page(),
            columns: self.state.columns.visible().collect(),
            showing: summary.showing(),
            page_buttons: summary.page_buttons(),
            page_sizes: &self.config.page_sizes,
            search_input: &self.state.search_input,
            predicates: &self.state.predicates,
            sort: &self.state.sort,
            page_check_state: self.page_check_state(),
            selected_count: self.state.selection.len(),
            options: self.config.table,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn page_positions(&self) -> &[usize] {
        let range = self.state.pagination.range(self.filtered.len());
        &self.filtered[range]
    }

    fn recompute(&mut self) {
        self.filtered = self.normalizer.positions(
            &self.records,
            &self.state.predicates,
            &self.state.sort,
            self.clock.now(),
            T::accessor,
        );
    }

    fn reset_page_if_out_of_range(&mut self) {
        let pagination = &mut self.state.pagination;
        if pagination.page_index > 0 && pagination.range(self.filtered.len()).is_empty() {
            debug!(page = pagination.page_index, "page out of range, reset");
            pagination.page_index = 0;
        }
    }

    fn prune_selection(&mut self) {
        if self.state.selection.is_empty() {
            return;
        }
        let in_view: HashSet<&RecordKey> = self.filtered.iter().map(|&i| &self.keys[i]).collect();
        self.state.selection.retain(|key| in_view.contains(key));
    }
}

impl<T, C: Clock> Drop for ViewController<T, C> {
    fn drop(&mut self) {
        self.search.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::columns::Column;
    use crate::ordering::SortKey;
    use crate::value::{Number, Timestamp, Value};
    use std::time::Duration;

    #[derive(Debug, Clone)]
    struct Row {
        id: u32,
        name: String,
        status: &'static str,
        at: Option<i64>,
    }

    impl Record for Row {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "id" => Value::Number(Number::from(self.id)),
                "name" => Value::String(&self.name),
                "status" => Value::Enum(self.status),
                "at" => self.at.map_or(Value::None, |ms| Value::Timestamp(Timestamp(ms))),
                _ => Value::None,
            }
        }

        fn key(&self) -> RecordKey {
            RecordKey::new(self.id.to_string())
        }
    }

    fn config() -> ViewConfig {
        ViewConfig::new([
            Column::new("select").unsortable().always_visible(),
            Column::new("id"),
            Column::new("name"),
            Column::new("status"),
            Column::new("at").hidden(),
        ])
        .with_searchable(["name"])
        .with_categorical(["status"])
        .with_timestamp_field("at")
    }

    fn rows(n: u32) -> Vec<Row> {
        (0..n)
            .map(|id| Row {
                id,
                name: format!("row {id}"),
                status: if id % 2 == 0 { "even" } else { "odd" },
                at: None,
            })
            .collect()
    }

    fn controller(n: u32) -> (ViewController<Row, ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        let view = ViewController::with_clock(rows(n), config(), clock.clone()).unwrap();
        (view, clock)
    }

    #[test]
    fn starts_on_first_page_with_default_size() {
        let (view, _) = controller(20);
        let summary = view.summary();
        assert_eq!(summary.page_index, 0);
        assert_eq!(summary.page_size, 8);
        assert_eq!(summary.page_count, 3);
        assert_eq!(view.view().rows.len(), 8);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = config().with_page_sizes([5, 10], 8);
        assert!(ViewController::new(rows(1), bad).is_err());
    }

    #[test]
    fn search_waits_for_quiet_period() {
        let (mut view, clock) = controller(20);

        view.set_search_text("row 1");
        assert_eq!(view.search_input(), "row 1");
        assert_eq!(view.search_text(), "");
        assert!(!view.poll());

        clock.advance(Duration::from_millis(499));
        assert!(!view.poll());

        clock.advance(Duration::from_millis(1));
        assert!(view.poll());
        assert_eq!(view.search_text(), "row 1");
        // row 1, row 10..row 19
        assert_eq!(view.filtered_len(), 11);
        assert_eq!(view.query_string(), "?search=row+1");
    }

    #[test]
    fn keystrokes_coalesce() {
        let (mut view, clock) = controller(20);
        view.next_page();

        for text in ["r", "ro", "row", "row 2"] {
            view.set_search_text(text);
            clock.advance(Duration::from_millis(100));
            assert!(!view.poll());
        }
        assert_eq!(view.summary().page_index, 1);

        clock.advance(Duration::from_millis(400));
        assert!(view.poll());
        assert_eq!(view.search_text(), "row 2");
        assert_eq!(view.summary().page_index, 0);
        assert!(!view.poll());
    }

    #[test]
    fn clearing_search_removes_query_param() {
        let (mut view, _) = controller(5);
        view.set_search_text("row");
        view.flush_search();
        assert_eq!(view.query_string(), "?search=row");

        view.set_search_text("");
        view.flush_search();
        assert_eq!(view.query_string(), "");
        assert_eq!(view.filtered_len(), 5);
    }

    #[test]
    fn query_string_seeds_search() {
        let (view, _) = controller(20);
        let view = view.with_query_string("?tab=all&search=row+3");

        assert_eq!(view.search_input(), "row 3");
        assert_eq!(view.search_text(), "row 3");
        assert_eq!(view.filtered_len(), 1);
        assert_eq!(view.query_string(), "?tab=all&search=row+3");
    }

    #[test]
    fn empty_search_param_is_dropped() {
        let (view, _) = controller(20);
        let view = view.with_query_string("?search=&tab=x");

        assert_eq!(view.search_input(), "");
        assert_eq!(view.search_text(), "");
        assert_eq!(view.filtered_len(), 20);
        assert_eq!(view.query_string(), "?tab=x");
    }

    #[test]
    fn filter_change_resets_page() {
        let (mut view, _) = controller(40);
        view.set_page_index(3);
        assert_eq!(view.summary().page_index, 3);

        view.set_categorical_filter("status", "odd").unwrap();
        assert_eq!(view.summary().page_index, 0);
        assert_eq!(view.filtered_len(), 20);

        view.set_categorical_filter("status", "all").unwrap();
        assert_eq!(view.filtered_len(), 40);
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let (mut view, _) = controller(4);
        let err = view.set_categorical_filter("colour", "red").unwrap_err();
        assert!(matches!(err, ViewError::UnknownColumn(name) if name == "colour"));
    }

    #[test]
    fn date_range_needs_timestamp_field() {
        let clock = ManualClock::default();
        let config = ViewConfig::new([Column::new("name")]);
        let mut view = ViewController::with_clock(rows(2), config, clock).unwrap();

        assert!(view.set_date_range(DateRange::Today).is_err());
        assert!(view.set_date_range(DateRange::All).is_ok());
    }

    #[test]
    fn date_range_filters_by_now() {
        let clock = ManualClock::default();
        let now = clock.now().timestamp_millis();
        let mut data = rows(3);
        data[1].at = Some(now - 1000);
        data[2].at = Some(now - 40 * 24 * 60 * 60 * 1000);

        let mut view = ViewController::with_clock(data, config(), clock).unwrap();
        view.set_date_range(DateRange::Last30Days).unwrap();

        let ids: Vec<u32> = view.filtered().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn sort_cycles_and_keeps_page() {
        let (mut view, _) = controller(20);
        view.set_page_index(1);

        view.set_sort("id").unwrap();
        assert_eq!(view.sort_spec().keys(), &[SortKey::asc("id")]);
        view.set_sort("id").unwrap();
        assert_eq!(view.sort_spec().keys(), &[SortKey::desc("id")]);
        assert_eq!(view.filtered()[0].id, 19);
        assert_eq!(view.summary().page_index, 1);

        view.set_sort("id").unwrap();
        assert!(view.sort_spec().is_empty());
        assert_eq!(view.filtered()[0].id, 0);
    }

    #[test]
    fn additive_sort() {
        let (mut view, _) = controller(6);
        view.set_sort("status").unwrap();
        view.set_sort_additive("id").unwrap();
        view.set_sort_additive("id").unwrap();

        let ids: Vec<u32> = view.filtered().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 2, 0, 5, 3, 1]);
    }

    #[test]
    fn unsortable_column_rejected() {
        let (mut view, _) = controller(3);
        assert!(matches!(
            view.set_sort("select"),
            Err(ViewError::ColumnNotSortable(_))
        ));
        assert!(matches!(
            view.set_sort("missing"),
            Err(ViewError::UnknownColumn(_))
        ));
        assert!(view.sort_spec().is_empty());
    }

    #[test]
    fn page_navigation_clamps() {
        let (mut view, _) = controller(20);
        view.set_page_index(99);
        assert_eq!(view.summary().page_index, 2);

        view.next_page();
        assert_eq!(view.summary().page_index, 2);

        view.previous_page();
        view.previous_page();
        view.previous_page();
        assert_eq!(view.summary().page_index, 0);

        view.last_page();
        assert_eq!(view.view().rows.len(), 4);
        view.first_page();
        assert!(!view.view().can_previous_page);
    }

    #[test]
    fn page_size_must_be_allowed() {
        let (mut view, _) = controller(20);
        let err = view.set_page_size(7).unwrap_err();
        assert!(matches!(
            err,
            ViewError::PageSizeNotAllowed { requested: 7, .. }
        ));
        assert_eq!(view.summary().page_size, 8);
    }

    #[test]
    fn page_size_change_keeps_first_row_visible() {
        let (mut view, _) = controller(50);
        view.set_page_size(5).unwrap();
        view.set_page_index(3);

        view.set_page_size(10).unwrap();
        assert_eq!(view.summary().page_index, 1);
        assert_eq!(view.view().rows[0].record.id, 10);
    }

    #[test]
    fn clear_all_filters_is_atomic() {
        let (mut view, _) = controller(20);
        view.set_search_text("row 1");
        view.flush_search();
        view.set_categorical_filter("status", "odd").unwrap();
        view.set_search_text("row 13");

        view.clear_all_filters();

        assert_eq!(view.search_input(), "");
        assert_eq!(view.search_text(), "");
        assert!(!view.is_search_pending());
        assert!(!view.predicates().is_active());
        assert_eq!(view.query_string(), "");
        assert_eq!(view.filtered_len(), 20);
    }

    #[test]
    fn select_all_is_page_scoped() {
        let (mut view, _) = controller(20);
        assert_eq!(view.page_check_state(), CheckState::Unchecked);

        view.toggle_select_all_on_page();
        assert_eq!(view.page_check_state(), CheckState::Checked);
        assert_eq!(view.selected_count(), 8);

        view.next_page();
        assert_eq!(view.page_check_state(), CheckState::Unchecked);
        view.toggle_selection(&RecordKey::from("9")).unwrap();
        assert_eq!(view.page_check_state(), CheckState::Indeterminate);

        view.toggle_select_all_on_page();
        assert_eq!(view.page_check_state(), CheckState::Checked);
        view.toggle_select_all_on_page();
        assert_eq!(view.page_check_state(), CheckState::Unchecked);
        assert_eq!(view.selected_count(), 8);
    }

    #[test]
    fn selection_pruned_when_rows_leave_view() {
        let (mut view, _) = controller(6);
        view.toggle_selection(&RecordKey::from("1")).unwrap();
        view.toggle_selection(&RecordKey::from("2")).unwrap();

        view.set_categorical_filter("status", "even").unwrap();
        let selected: Vec<u32> = view.selected_records().iter().map(|r| r.id).collect();
        assert_eq!(selected, vec![2]);
        assert!(!view.is_selected(&RecordKey::from("1")));
    }

    #[test]
    fn toggling_unknown_record_fails() {
        let (mut view, _) = controller(3);
        assert!(matches!(
            view.toggle_selection(&RecordKey::from("42")),
            Err(ViewError::UnknownRecord(_))
        ));
    }

    #[test]
    fn column_visibility() {
        let (mut view, _) = controller(3);
        assert!(view.toggle_column_visibility("at").unwrap());
        view.set_column_visible("name", false).unwrap();

        let names: Vec<&str> = view.view().columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["select", "id", "status", "at"]);

        assert!(view.set_column_visible("select", false).is_err());
    }

    #[test]
    fn replacing_records_resets_out_of_range_page() {
        let (mut view, _) = controller(40);
        view.last_page();
        assert_eq!(view.summary().page_index, 4);

        view.set_records(rows(10));
        assert_eq!(view.summary().page_index, 0);
        assert_eq!(view.filtered_len(), 10);
    }

    #[test]
    fn replacing_records_keeps_valid_page() {
        let (mut view, _) = controller(40);
        view.set_page_index(1);
        view.set_records(rows(30));
        assert_eq!(view.summary().page_index, 1);
    }

    #[test]
    fn teardown_cancels_pending_search() {
        let (mut view, clock) = controller(5);
        view.set_search_text("row 1");
        view.teardown();
        view.teardown();

        clock.advance(Duration::from_secs(1));
        assert!(!view.poll());
        assert_eq!(view.search_text(), "");
    }

    #[test]
    fn snapshot_reports_footer_and_buttons() {
        let (mut view, _) = controller(60);
        view.set_page_size(5).unwrap();
        view.set_page_index(2);

        let snapshot = view.view();
        assert_eq!(snapshot.showing.to_string(), "Showing 11 to 15 of 60 entries");
        assert_eq!(snapshot.page_buttons.len(), 7);
        assert!(snapshot.can_next_page);
        assert!(snapshot.can_previous_page);
        assert_eq!(snapshot.page_sizes, &[5, 8, 10, 20, 50]);
    }
}
