//! One-shot view requests: the command line equivalent of a user clicking
//! through a table.

use anyhow::{Context, Result};
use listview::{Clock, DateRange, Record, RecordKey, SortKey, SortSpec, ViewController};
use serde::Serialize;
use tracing::debug;

use crate::table;

/// Interactions to replay against a fresh controller, in the order a user
/// would perform them.
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    /// URL query string seeding the search box.
    pub query: Option<String>,
    pub search: Option<String>,
    /// Categorical filters as `(name, value)`; `"all"` clears one.
    pub filters: Vec<(String, String)>,
    pub date_range: Option<DateRange>,
    pub sort: Vec<SortKey>,
    /// One-based page number.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub hide: Vec<String>,
    pub select: Vec<String>,
    pub select_page: bool,
}

impl ViewRequest {
    pub fn apply<T, C>(&self, view: ViewController<T, C>) -> Result<ViewController<T, C>>
    where
        T: Record,
        C: Clock,
    {
        let mut view = match &self.query {
            Some(query) => view.with_query_string(query),
            None => view,
        };

        if let Some(search) = &self.search {
            view.set_search_text(search.clone());
            view.flush_search();
        }
        for (name, value) in &self.filters {
            view.set_categorical_filter(name, value.as_str())
                .with_context(|| format!("cannot filter by '{name}'"))?;
        }
        if let Some(range) = self.date_range {
            view.set_date_range(range)?;
        }
        if !self.sort.is_empty() {
            view.set_sort_spec(self.sort.iter().cloned().collect::<SortSpec>())?;
        }
        if let Some(size) = self.page_size {
            view.set_page_size(size)?;
        }
        if let Some(page) = self.page {
            view.set_page_index(page.saturating_sub(1));
        }
        for column in &self.hide {
            view.set_column_visible(column, false)?;
        }
        for key in &self.select {
            view.toggle_selection(&RecordKey::from(key.as_str()))?;
        }
        if self.select_page {
            view.toggle_select_all_on_page();
        }

        debug!(
            filtered = view.filtered_len(),
            query = %view.query_string(),
            "request applied"
        );
        Ok(view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn render<T, C>(view: &ViewController<T, C>, format: OutputFormat) -> Result<String>
where
    T: Record + Serialize,
    C: Clock,
{
    let snapshot = view.view();
    match format {
        OutputFormat::Table => Ok(table::render(&snapshot)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&snapshot).context("failed to serialize view")
        }
    }
}
