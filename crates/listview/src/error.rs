//! Error types for the list view.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Contract violations and configuration failures.
///
/// User-facing tolerance (an out-of-range page index) is handled by
/// clamping and never shows up here.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A column name that the view was not configured with.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Sorting was requested on a column configured as unsortable.
    #[error("column '{0}' is not sortable")]
    ColumnNotSortable(String),

    /// Hiding was requested on a column configured as always visible.
    #[error("column '{0}' cannot be hidden")]
    ColumnNotHideable(String),

    /// A record key that is not in the current filtered view.
    #[error("no record with key '{0}' in the current view")]
    UnknownRecord(String),

    /// A page size outside the configured set.
    #[error("page size {requested} is not one of the allowed sizes {allowed:?}")]
    PageSizeNotAllowed { requested: usize, allowed: Vec<usize> },

    /// The view configuration is inconsistent.
    #[error("invalid view configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ViewError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for list view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
