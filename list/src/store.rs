//! `ListStore`: the facade UI code talks to.
//!
//! Wraps the runtime [`Store`] with one method per list operation. Operations
//! never fail from the caller's point of view; each returns an
//! [`EffectHandle`] that resolves once its persistence write has finished.

use crate::reducer::{ListEnvironment, ListReducer};
use crate::types::{Filter, Item, ItemId, ListAction, ListState};
use crate::view::ListSnapshot;
use shopping_list_runtime::{EffectHandle, Store, StoreConfig, StoreError};
use std::time::Duration;
use tokio::sync::broadcast;

type Inner = Store<ListState, ListAction, ListEnvironment, ListReducer>;

/// Shopping list state container
///
/// Cloning yields another handle onto the same list.
#[derive(Clone)]
pub struct ListStore {
    store: Inner,
}

impl ListStore {
    /// Create a store and hydrate it from storage
    ///
    /// Returns once the persisted record has been loaded (or found missing
    /// or unreadable), so the store is always ready.
    pub async fn open(env: ListEnvironment) -> Self {
        Self::open_with_config(env, StoreConfig::default()).await
    }

    /// [`ListStore::open`] with custom runtime settings
    pub async fn open_with_config(env: ListEnvironment, config: StoreConfig) -> Self {
        let store = Store::with_config(ListState::new(), ListReducer::new(), env, config);
        let list = Self { store };

        list.dispatch(ListAction::Hydrate).await.wait().await;

        list
    }

    async fn dispatch(&self, action: ListAction) -> EffectHandle {
        let name = action.name();
        match self.store.send(action).await {
            Ok(handle) => handle,
            Err(error) => {
                tracing::warn!(action = name, error = %error, "List action dropped");
                EffectHandle::completed()
            },
        }
    }

    // ========== Operations ==========

    /// Add an item at the top of the list
    ///
    /// Blank text is ignored.
    pub async fn add_item(&self, text: impl Into<String>) -> EffectHandle {
        self.dispatch(ListAction::AddItem { text: text.into() }).await
    }

    /// Flip an item's completion flag
    pub async fn toggle_item(&self, id: &ItemId) -> EffectHandle {
        self.dispatch(ListAction::ToggleItem { id: id.clone() }).await
    }

    /// Remove an item
    pub async fn delete_item(&self, id: &ItemId) -> EffectHandle {
        self.dispatch(ListAction::DeleteItem { id: id.clone() }).await
    }

    /// Replace an item's text
    ///
    /// Blank text leaves the item unchanged.
    pub async fn update_item(&self, id: &ItemId, text: impl Into<String>) -> EffectHandle {
        self.dispatch(ListAction::UpdateItem {
            id: id.clone(),
            text: text.into(),
        })
        .await
    }

    /// Remove every completed item
    pub async fn clear_completed(&self) -> EffectHandle {
        self.dispatch(ListAction::ClearCompleted).await
    }

    /// Change the view filter
    pub async fn set_filter(&self, filter: Filter) {
        self.dispatch(ListAction::SetFilter { filter }).await;
    }

    // ========== Reads ==========

    /// Every item, most recent first
    pub async fn items(&self) -> Vec<Item> {
        self.store.state(|s| s.items.clone()).await
    }

    /// Active filter
    pub async fn filter(&self) -> Filter {
        self.store.state(|s| s.filter).await
    }

    /// Whether hydration has finished
    pub async fn is_ready(&self) -> bool {
        self.store.state(|s| s.ready).await
    }

    /// Items visible under the active filter
    pub async fn filtered_items(&self) -> Vec<Item> {
        self.store.state(ListState::filtered_items).await
    }

    /// Number of uncompleted items
    pub async fn active_count(&self) -> usize {
        self.store.state(ListState::active_count).await
    }

    /// Number of completed items
    pub async fn completed_count(&self) -> usize {
        self.store.state(ListState::completed_count).await
    }

    /// Consistent copy of the whole view model
    pub async fn snapshot(&self) -> ListSnapshot {
        self.store.state(ListSnapshot::from_state).await
    }

    /// Read arbitrary state
    pub async fn state<T>(&self, f: impl FnOnce(&ListState) -> T) -> T {
        self.store.state(f).await
    }

    // ========== Lifecycle ==========

    /// Receive every action the list reduces
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ListAction> {
        self.store.subscribe_actions()
    }

    /// Wait for pending writes
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if writes are still running
    /// after `timeout`.
    pub async fn flush(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.flush(timeout).await
    }

    /// Stop accepting operations and wait for pending writes
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if writes are still running
    /// after `timeout`.
    pub async fn close(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}

impl std::fmt::Debug for ListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListStore")
            .field("pending_effects", &self.store.pending_effects())
            .finish_non_exhaustive()
    }
}
