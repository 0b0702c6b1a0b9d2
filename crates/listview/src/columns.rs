//! Column definitions and visibility.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};

/// A table column.
///
/// `name` is the record field the column reads (and sorts on). Columns
/// that are not `hideable`, such as a selection checkbox column, stay
/// visible whatever the caller asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub hideable: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            label: None,
            sortable: true,
            hideable: true,
            visible: true,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self.visible = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Header text. Falls back to the field name.
    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// The configured columns, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        ColumnSet { columns }
    }

    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.visible)
    }

    /// Looks up a column that may be used as a sort key.
    pub fn sortable(&self, name: &str) -> Result<&Column> {
        let column = self.require(name)?;
        if !column.sortable {
            return Err(ViewError::ColumnNotSortable(name.to_string()));
        }
        Ok(column)
    }

    /// Sets visibility. Returns whether anything changed.
    pub fn set_visible(&mut self, name: &str, visible: bool) -> Result<bool> {
        let column = self.require_mut(name)?;
        if !visible && !column.hideable {
            return Err(ViewError::ColumnNotHideable(name.to_string()));
        }
        let changed = column.visible != visible;
        column.visible = visible;
        Ok(changed)
    }

    /// Flips visibility. Returns the new visibility.
    pub fn toggle_visibility(&mut self, name: &str) -> Result<bool> {
        let visible = !self.require(name)?.visible;
        self.set_visible(name, visible)?;
        Ok(visible)
    }

    fn require(&self, name: &str) -> Result<&Column> {
        self.get(name)
            .ok_or_else(|| ViewError::UnknownColumn(name.to_string()))
    }

    fn require_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| ViewError::UnknownColumn(name.to_string()))
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        ColumnSet::new(iter.into_iter().collect())
    }
}
