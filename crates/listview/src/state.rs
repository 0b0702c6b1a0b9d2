//! Interactive view state and the read-only snapshot handed to renderers.

use serde::Serialize;

use crate::columns::{Column, ColumnSet};
use crate::config::{TableOptions, ViewConfig};
use crate::ordering::SortSpec;
use crate::pagination::{PageButton, PageSummary, Pagination, ShowingRange};
use crate::predicate::{FilterValue, PredicateSet};
use crate::record::RecordKey;
use crate::selection::{CheckState, SelectionSet};

/// Everything the user can change about a view.
///
/// `search_input` is what the search box shows right now; the committed
/// search in `predicates` trails it by the debounce period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_input: String,
    pub predicates: PredicateSet,
    pub sort: SortSpec,
    pub pagination: Pagination,
    pub selection: SelectionSet,
    pub columns: ColumnSet,
}

impl ViewState {
    /// Initial state: every filter inactive, first page, default page size.
    pub fn from_config(config: &ViewConfig) -> Self {
        let mut predicates = PredicateSet::new();
        for name in &config.categorical {
            predicates.categorical.insert(name.clone(), FilterValue::All);
        }

        ViewState {
            search_input: String::new(),
            predicates,
            sort: SortSpec::new(),
            pagination: Pagination::new(config.default_page_size),
            selection: SelectionSet::new(),
            columns: config.columns.clone(),
        }
    }
}

/// One row of the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageRow<'a, T> {
    /// Position in the controller's record list.
    pub index: usize,
    pub key: &'a RecordKey,
    pub record: &'a T,
    pub selected: bool,
}

/// What a table needs to draw itself.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a, T> {
    pub rows: Vec<PageRow<'a, T>>,
    pub summary: PageSummary,
    pub can_previous_page: bool,
    pub can_next_page: bool,
    pub columns: Vec<&'a Column>,
    pub showing: ShowingRange,
    pub page_buttons: Vec<PageButton>,
    pub page_sizes: &'a [usize],
    pub search_input: &'a str,
    pub predicates: &'a PredicateSet,
    pub sort: &'a SortSpec,
    pub page_check_state: CheckState,
    pub selected_count: usize,
    pub options: TableOptions,
}

impl<'a, T> ViewSnapshot<'a, T> {
    pub fn records(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.rows.iter().map(|row| row.record)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
