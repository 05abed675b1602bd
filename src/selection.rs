//! Cross-page selection tracking for bulk actions.
//!
//! While selection mode is active, the controller shows checkboxes and lets
//! the operator pick records across page boundaries. [`SelectionSet`] is the
//! underlying set of record IDs: page navigation never disturbs it, a
//! page-level toggle is tri-state aware, and the set is pruned against the
//! collection after every refresh so removed records can't linger in a bulk
//! payload.

use std::collections::BTreeSet;

/// Aggregate selection state of one page, driving the tri-state
/// select-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// No record on the page is selected.
    None,
    /// Some, but not all, records on the page are selected.
    Partial,
    /// Every record on the page is selected.
    All,
}

/// A set of selected record IDs that survives page changes.
///
/// IDs are kept in a sorted set so bulk payloads are deterministic.
///
/// # Examples
///
/// ```rust
/// use recordlist::selection::{PageState, SelectionSet};
///
/// let mut selection = SelectionSet::new();
/// selection.toggle("APP-002");
/// selection.toggle("APP-001");
/// assert_eq!(selection.ids(), vec!["APP-001", "APP-002"]);
///
/// // Selecting the whole visible page keeps other pages intact.
/// selection.select_page(&["APP-010".into(), "APP-011".into()]);
/// assert_eq!(selection.len(), 4);
/// assert_eq!(
///     selection.page_state(&["APP-010".into(), "APP-011".into()]),
///     PageState::All
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of selected records.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true when the given ID is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns the selected IDs in sorted order.
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Flips membership of one ID.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Toggles a whole page of IDs.
    ///
    /// If every ID on the page is already selected the page is deselected;
    /// otherwise the whole page is selected. Selections on other pages are
    /// untouched either way. Applying this twice with no intervening change
    /// is a no-op overall.
    ///
    /// ```rust
    /// use recordlist::selection::SelectionSet;
    ///
    /// let page: Vec<String> = vec!["a".into(), "b".into()];
    /// let mut selection = SelectionSet::new();
    /// selection.toggle("elsewhere");
    ///
    /// selection.select_page(&page);
    /// selection.select_page(&page);
    /// assert_eq!(selection.ids(), vec!["elsewhere"]);
    /// ```
    pub fn select_page(&mut self, page_ids: &[String]) {
        if page_ids.is_empty() {
            return;
        }
        if page_ids.iter().all(|id| self.ids.contains(id)) {
            for id in page_ids {
                self.ids.remove(id);
            }
        } else {
            for id in page_ids {
                self.ids.insert(id.clone());
            }
        }
    }

    /// Reports the tri-state status of a page of IDs.
    pub fn page_state(&self, page_ids: &[String]) -> PageState {
        if page_ids.is_empty() {
            return PageState::None;
        }
        let selected = page_ids.iter().filter(|id| self.ids.contains(*id)).count();
        if selected == 0 {
            PageState::None
        } else if selected == page_ids.len() {
            PageState::All
        } else {
            PageState::Partial
        }
    }

    /// Drops IDs that no longer exist in the collection.
    ///
    /// Called after every refresh so records removed upstream can't remain
    /// in a pending bulk payload.
    pub fn retain<'a, I>(&mut self, valid_ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let valid: BTreeSet<&str> = valid_ids.into_iter().collect();
        self.ids.retain(|id| valid.contains(id.as_str()));
    }

    /// Empties the selection.
    ///
    /// Called when selection mode is exited and after a successful bulk
    /// action.
    pub fn reset(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        assert!(selection.contains("a"));
        selection.toggle("a");
        assert!(selection.is_empty());
    }

    #[test]
    fn select_page_is_its_own_inverse() {
        let mut selection = SelectionSet::new();
        let ids = page(&["a", "b", "c"]);
        selection.select_page(&ids);
        assert_eq!(selection.page_state(&ids), PageState::All);
        selection.select_page(&ids);
        assert_eq!(selection.page_state(&ids), PageState::None);
        assert!(selection.is_empty());
    }

    #[test]
    fn partially_selected_page_becomes_fully_selected() {
        let mut selection = SelectionSet::new();
        let ids = page(&["a", "b", "c"]);
        selection.toggle("b");
        assert_eq!(selection.page_state(&ids), PageState::Partial);
        selection.select_page(&ids);
        assert_eq!(selection.page_state(&ids), PageState::All);
    }

    #[test]
    fn page_toggles_leave_other_pages_alone() {
        let mut selection = SelectionSet::new();
        selection.toggle("other-page-1");
        let ids = page(&["a", "b"]);
        selection.select_page(&ids);
        selection.select_page(&ids);
        assert_eq!(selection.ids(), vec!["other-page-1"]);
    }

    #[test]
    fn retain_prunes_removed_records() {
        let mut selection = SelectionSet::new();
        selection.toggle("kept");
        selection.toggle("removed");
        selection.retain(["kept", "unrelated"]);
        assert_eq!(selection.ids(), vec!["kept"]);
    }

    #[test]
    fn ids_are_deterministically_ordered() {
        let mut selection = SelectionSet::new();
        for id in ["zeta", "alpha", "mid"] {
            selection.toggle(id);
        }
        assert_eq!(selection.ids(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn reset_empties_everything() {
        let mut selection = SelectionSet::new();
        selection.select_page(&page(&["a", "b"]));
        selection.reset();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
    }
}
