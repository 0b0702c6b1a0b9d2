//! Row selection.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::record::RecordKey;

/// State of a tri-state "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Keys of the selected records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    keys: BTreeSet<RecordKey>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet::default()
    }

    pub fn contains(&self, key: &RecordKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordKey> {
        self.keys.iter()
    }

    pub fn select(&mut self, key: RecordKey) {
        self.keys.insert(key);
    }

    pub fn deselect(&mut self, key: &RecordKey) {
        self.keys.remove(key);
    }

    /// Flips one key. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, key: RecordKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Drops keys for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&RecordKey) -> bool) {
        self.keys.retain(|key| keep(key));
    }

    /// Checkbox state for a group of rows, such as the current page.
    pub fn check_state<'k>(&self, group: impl IntoIterator<Item = &'k RecordKey>) -> CheckState {
        let mut total = 0;
        let mut selected = 0;
        for key in group {
            total += 1;
            if self.keys.contains(key) {
                selected += 1;
            }
        }

        match selected {
            0 => CheckState::Unchecked,
            n if n == total => CheckState::Checked,
            _ => CheckState::Indeterminate,
        }
    }

    /// Header checkbox click: a fully selected group is cleared, anything
    /// else becomes fully selected.
    pub fn toggle_group(&mut self, group: &[RecordKey]) {
        if self.check_state(group) == CheckState::Checked {
            for key in group {
                self.keys.remove(key);
            }
        } else {
            self.keys.extend(group.iter().cloned());
        }
    }
}

impl FromIterator<RecordKey> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RecordKey>>(iter: I) -> Self {
        SelectionSet {
            keys: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ids: &[&str]) -> Vec<RecordKey> {
        ids.iter().map(|id| RecordKey::from(*id)).collect()
    }

    #[test]
    fn toggle_flips() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(RecordKey::from("a")));
        assert!(!selection.toggle(RecordKey::from("a")));
        assert!(selection.is_empty());
    }

    #[test]
    fn check_state_of_group() {
        let page = keys(&["a", "b", "c"]);
        let mut selection = SelectionSet::new();
        assert_eq!(selection.check_state(&page), CheckState::Unchecked);

        selection.select(RecordKey::from("b"));
        assert_eq!(selection.check_state(&page), CheckState::Indeterminate);

        selection.select(RecordKey::from("a"));
        selection.select(RecordKey::from("c"));
        assert_eq!(selection.check_state(&page), CheckState::Checked);
    }

    #[test]
    fn empty_group_is_unchecked() {
        let selection: SelectionSet = keys(&["a"]).into_iter().collect();
        assert_eq!(selection.check_state(&[]), CheckState::Unchecked);
    }

    #[test]
    fn toggle_group_only_touches_the_group() {
        let mut selection: SelectionSet = keys(&["x", "b"]).into_iter().collect();
        let page = keys(&["a", "b"]);

        selection.toggle_group(&page);
        assert_eq!(selection.len(), 3);
        assert_eq!(selection.check_state(&page), CheckState::Checked);

        selection.toggle_group(&page);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![&RecordKey::from("x")]);
    }

    #[test]
    fn retain_prunes() {
        let mut selection: SelectionSet = keys(&["a", "b", "c"]).into_iter().collect();
        selection.retain(|key| key.as_str() != "b");
        assert_eq!(selection.len(), 2);
        assert!(!selection.contains(&RecordKey::from("b")));
    }
}
