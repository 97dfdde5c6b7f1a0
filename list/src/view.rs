//! Owned view model handed to rendering adapters.

use crate::types::{Filter, Item, ListState};

/// Point-in-time copy of everything a view needs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListSnapshot {
    /// Full collection, most recent first
    pub items: Vec<Item>,
    /// Active filter
    pub filter: Filter,
    /// Whether hydration has finished
    pub ready: bool,
    /// Items visible under `filter`
    pub filtered_items: Vec<Item>,
    /// Number of uncompleted items
    pub active_count: usize,
    /// Number of completed items
    pub completed_count: usize,
}

impl ListSnapshot {
    /// Capture the current state
    #[must_use]
    pub fn from_state(state: &ListState) -> Self {
        Self {
            items: state.items.clone(),
            filter: state.filter,
            ready: state.ready,
            filtered_items: state.filtered_items(),
            active_count: state.active_count(),
            completed_count: state.completed_count(),
        }
    }

    /// `"1 item left"` or `"N items left"`
    #[must_use]
    pub fn items_left_label(&self) -> String {
        let noun = if self.active_count == 1 { "item" } else { "items" };
        format!("{} {noun} left", self.active_count)
    }

    /// Whether there is anything for "clear completed" to remove
    #[must_use]
    pub const fn can_clear_completed(&self) -> bool {
        self.completed_count > 0
    }

    /// Whether the footer (counts, filters) should be shown
    #[must_use]
    pub fn show_footer(&self) -> bool {
        !self.items.is_empty()
    }

    /// Whether the current view has nothing to list
    #[must_use]
    pub fn is_empty_view(&self) -> bool {
        self.filtered_items.is_empty()
    }
}

impl From<&ListState> for ListSnapshot {
    fn from(state: &ListState) -> Self {
        Self::from_state(state)
    }
}
