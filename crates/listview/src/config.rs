//! View configuration.
//!
//! One [`ViewConfig`] describes a table: its columns, which fields the search
//! box and date filter read, which categorical filters exist, and the
//! page-size choices. Configurations can be built in code or loaded from
//! YAML or JSON.
//!
//! ```yaml
//! columns:
//!   - { name: payroll_id, label: Payroll ID }
//!   - { name: employee_name, label: Employee }
//!   - { name: status, label: Status }
//!   - { name: processed_at, visible: false }
//! searchable: [payroll_id, employee_name]
//! timestamp_field: processed_at
//! categorical: [status]
//! page_sizes: [5, 8, 10, 20, 50]
//! default_page_size: 8
//! debounce_ms: 500
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::columns::{Column, ColumnSet};
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::error::{Result, ViewError};
use crate::normalize::Normalizer;
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZES};

/// Query-string parameter the committed search text is mirrored to.
pub const DEFAULT_SEARCH_PARAM: &str = "search";

/// Presentation switches for a table.
///
/// These do not change filtering; they tell a renderer which controls to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub searchable: bool,
    pub show_pagination: bool,
    pub show_filters: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            searchable: true,
            show_pagination: true,
            show_filters: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub columns: ColumnSet,
    /// Fields matched by free-text search.
    pub searchable: Vec<String>,
    /// Field the date-range filter reads.
    pub timestamp_field: Option<String>,
    /// Names of the categorical filters.
    pub categorical: Vec<String>,
    pub page_sizes: Vec<usize>,
    pub default_page_size: usize,
    pub debounce_ms: u64,
    pub search_param: String,
    pub table: TableOptions,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            columns: ColumnSet::default(),
            searchable: Vec::new(),
            timestamp_field: None,
            categorical: Vec::new(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            search_param: DEFAULT_SEARCH_PARAM.to_string(),
            table: TableOptions::default(),
        }
    }
}

impl ViewConfig {
    pub fn new<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        ViewConfig {
            columns: columns.into_iter().collect(),
            ..ViewConfig::default()
        }
    }

    pub fn with_searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self
    }

    pub fn with_categorical<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page_sizes(mut self, sizes: impl Into<Vec<usize>>, default: usize) -> Self {
        self.page_sizes = sizes.into();
        self.default_page_size = default;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_search_param(mut self, name: impl Into<String>) -> Self {
        self.search_param = name.into();
        self
    }

    pub fn with_table_options(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    /// Parses a YAML configuration and validates it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ViewConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON configuration and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file. The format follows the extension:
    /// `.yaml`/`.yml` or `.json`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ViewError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(ViewError::invalid_config(format!(
                "unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn normalizer(&self) -> Normalizer {
        let normalizer = Normalizer::new(self.searchable.iter().cloned());
        match &self.timestamp_field {
            Some(field) => normalizer.with_timestamp_field(field.clone()),
            None => normalizer,
        }
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.categorical.iter().any(|f| f == name)
    }

    /// Checks that the configuration is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.page_sizes.is_empty() {
            return Err(ViewError::invalid_config("page_sizes must not be empty"));
        }
        if self.page_sizes.contains(&0) {
            return Err(ViewError::invalid_config("page sizes must be positive"));
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            return Err(ViewError::invalid_config(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, self.page_sizes
            )));
        }
        if self.search_param.is_empty() {
            return Err(ViewError::invalid_config("search_param must not be empty"));
        }

        let mut seen = HashSet::new();
        for column in self.columns.all() {
            if !seen.insert(column.name.as_str()) {
                return Err(ViewError::invalid_config(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
            if !column.hideable && !column.visible {
                return Err(ViewError::invalid_config(format!(
                    "column '{}' cannot be hidden but is configured as hidden",
                    column.name
                )));
            }
        }

        let referenced = self
            .searchable
            .iter()
            .map(|f| ("searchable", f))
            .chain(self.timestamp_field.iter().map(|f| ("timestamp_field", f)))
            .chain(self.categorical.iter().map(|f| ("categorical", f)));
        for (role, field) in referenced {
            if !self.columns.contains(field) {
                return Err(ViewError::invalid_config(format!(
                    "{role} field '{field}' is not a configured column"
                )));
            }
        }
        Ok(())
    }
}
