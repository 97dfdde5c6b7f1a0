//! Reducer logic for the shopping list.
//!
//! Every mutation trims and validates its input, updates the collection in
//! place, and returns a single fire-and-forget effect that writes the whole
//! collection. Invalid input (empty text, unknown id) is a silent no-op.

use crate::config::ListConfig;
use crate::persistence::Persistence;
use crate::storage::JsonFileStorage;
use crate::types::{Item, ItemId, ListAction, ListState};
use shopping_list_core::{
    async_effect,
    effect::Effect,
    environment::{Clock, IdGenerator, SystemClock, UuidIdGenerator},
    fire_and_forget,
    reducer::Reducer,
    storage::KeyValueStorage,
    SmallVec,
};
use std::sync::Arc;

/// Environment dependencies for the list reducer
#[derive(Clone)]
pub struct ListEnvironment {
    /// Reads and writes the persisted record
    pub persistence: Arc<Persistence>,
    /// Clock for item creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of fresh item IDs
    pub ids: Arc<dyn IdGenerator>,
}

impl ListEnvironment {
    /// Creates a new `ListEnvironment` persisting under the default key
    #[must_use]
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            persistence: Arc::new(Persistence::new(storage)),
            clock,
            ids,
        }
    }

    /// Persist under `key` instead of the default
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let storage = self.persistence.storage();
        self.persistence = Arc::new(Persistence::with_key(storage, key));
        self
    }

    /// Production environment: JSON files under the configured directory,
    /// the system clock and UUID identifiers
    #[must_use]
    pub fn from_config(config: &ListConfig) -> Self {
        let storage = Arc::new(JsonFileStorage::new(&config.data_dir));
        Self::new(storage, Arc::new(SystemClock), Arc::new(UuidIdGenerator))
            .with_key(config.storage_key.clone())
    }
}

impl std::fmt::Debug for ListEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEnvironment")
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}

/// Reducer for the shopping list
#[derive(Clone, Debug)]
pub struct ListReducer;

impl ListReducer {
    /// Creates a new `ListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Trimmed text, or `None` if nothing is left
    fn clean_text(text: &str) -> Option<&str> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Bumps the revision and snapshots the collection into a write effect
    fn persist(state: &mut ListState, env: &ListEnvironment) -> SmallVec<[Effect<ListAction>; 4]> {
        state.revision += 1;

        let revision = state.revision;
        let items = state.items.clone();
        let persistence = Arc::clone(&env.persistence);

        let mut effects = SmallVec::new();
        effects.push(fire_and_forget! {
            persistence.write_logged(revision, items).await;
        });
        effects
    }

    /// Marks the state ready with `items`, unless hydration already happened
    ///
    /// Stored text is trimmed; items left blank are dropped.
    fn apply_hydration(state: &mut ListState, items: Vec<Item>) {
        if state.ready {
            tracing::debug!("Ignoring repeated hydration result");
            return;
        }

        let loaded = items.len();
        state.items = items
            .into_iter()
            .filter_map(|mut item| {
                let text = Self::clean_text(&item.text)?.to_string();
                item.text = text;
                Some(item)
            })
            .collect();

        let dropped = loaded - state.items.len();
        if dropped > 0 {
            tracing::warn!(dropped, "Dropped saved items with blank text");
        }
        state.ready = true;
        tracing::info!(items = state.items.len(), "List hydrated");
    }
}

impl Default for ListReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if action.is_mutation() && !state.ready {
            tracing::debug!(action = action.name(), "Ignoring mutation before hydration");
            return SmallVec::new();
        }

        match action {
            // ========== Lifecycle ==========
            ListAction::Hydrate => {
                if state.ready {
                    return SmallVec::new();
                }

                let persistence = Arc::clone(&env.persistence);
                let mut effects = SmallVec::new();
                effects.push(async_effect! {
                    match persistence.load().await {
                        Ok(Some(items)) => Some(ListAction::Hydrated { items }),
                        Ok(None) => {
                            tracing::debug!(key = persistence.key(), "No saved list, starting empty");
                            Some(ListAction::Hydrated { items: Vec::new() })
                        },
                        Err(error) => {
                            tracing::warn!(key = persistence.key(), error = %error, "Failed to load list");
                            Some(ListAction::HydrationFailed { reason: error.to_string() })
                        },
                    }
                });
                effects
            },

            ListAction::Hydrated { items } => {
                Self::apply_hydration(state, items);
                SmallVec::new()
            },

            ListAction::HydrationFailed { reason } => {
                tracing::debug!(%reason, "Starting with an empty list");
                Self::apply_hydration(state, Vec::new());
                SmallVec::new()
            },

            // ========== Mutations ==========
            ListAction::AddItem { text } => {
                let Some(text) = Self::clean_text(&text) else {
                    return SmallVec::new();
                };

                let item = Item::new(
                    ItemId::new(env.ids.next_id()),
                    text.to_string(),
                    env.clock.now(),
                );
                state.items.insert(0, item);

                Self::persist(state, env)
            },

            ListAction::ToggleItem { id } => {
                let Some(item) = state.get_mut(&id) else {
                    return SmallVec::new();
                };
                item.toggle();

                Self::persist(state, env)
            },

            ListAction::DeleteItem { id } => {
                let Some(index) = state.items.iter().position(|item| item.id == id) else {
                    return SmallVec::new();
                };
                state.items.remove(index);

                Self::persist(state, env)
            },

            ListAction::UpdateItem { id, text } => {
                let Some(text) = Self::clean_text(&text) else {
                    return SmallVec::new();
                };
                let Some(item) = state.get_mut(&id) else {
                    return SmallVec::new();
                };
                text.clone_into(&mut item.text);

                Self::persist(state, env)
            },

            ListAction::ClearCompleted => {
                state.items.retain(|item| !item.completed);

                Self::persist(state, env)
            },

            // ========== View ==========
            ListAction::SetFilter { filter } => {
                state.filter = filter;
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{decode_items, DEFAULT_STORAGE_KEY};
    use crate::types::Filter;
    use shopping_list_testing::{
        assertions, test_clock, InMemoryStorage, ReducerTest, SequentialIdGenerator,
    };

    fn test_env(storage: &InMemoryStorage) -> ListEnvironment {
        ListEnvironment::new(
            Arc::new(storage.clone()),
            Arc::new(test_clock()),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    fn add(text: &str) -> ListAction {
        ListAction::AddItem {
            text: text.to_string(),
        }
    }

    fn item(id: &str, text: &str, completed: bool) -> Item {
        let mut item = Item::new(ItemId::new(id), text.to_string(), test_clock().now());
        item.completed = completed;
        item
    }

    async fn run_effects(effects: SmallVec<[Effect<ListAction>; 4]>) -> Vec<ListAction> {
        let mut produced = Vec::new();
        for effect in effects {
            if let Effect::Future(fut) = effect {
                produced.extend(fut.await);
            }
        }
        produced
    }

    #[test]
    fn add_item_prepends_trimmed_text() {
        let storage = InMemoryStorage::new();
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::ready_with(vec![]))
            .when_actions([add("Milk"), add("  Eggs  ")])
            .then_state(|state| {
                let texts: Vec<_> = state.items.iter().map(|i| i.text.as_str()).collect();
                assert_eq!(texts, ["Eggs", "Milk"]);
                assert_eq!(state.items[0].id.as_str(), "item-2");
                assert!(!state.items[0].completed);
                assert_eq!(state.items[0].created_at.as_str(), "2025-01-01T00:00:00.000Z");
                assert_eq!(state.revision, 2);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 2);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn add_item_rejects_blank_text() {
        let storage = InMemoryStorage::new();
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::ready_with(vec![]))
            .when_actions([add(""), add("   "), add("\t\n")])
            .then_state(|state| {
                assert!(state.is_empty());
                assert_eq!(state.revision, 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn mutations_before_hydration_are_ignored() {
        let storage = InMemoryStorage::new();
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::new())
            .when_actions([add("Milk"), ListAction::ClearCompleted])
            .then_state(|state| {
                assert!(state.is_empty());
                assert!(!state.ready);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn set_filter_works_before_hydration() {
        let storage = InMemoryStorage::new();
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::new())
            .when_action(ListAction::SetFilter {
                filter: Filter::Completed,
            })
            .then_state(|state| assert_eq!(state.filter, Filter::Completed))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let storage = InMemoryStorage::new();
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::ready_with(vec![item("a", "Milk", false)]))
            .when_action(ListAction::ToggleItem {
                id: ItemId::new("missing"),
            })
            .then_state(|state| {
                assert!(!state.items[0].completed);
                assert_eq!(state.revision, 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let storage = InMemoryStorage::new();
        let id = ItemId::new("a");
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::ready_with(vec![item("a", "Milk", false)]))
            .when_actions([
                ListAction::ToggleItem { id: id.clone() },
                ListAction::ToggleItem { id },
            ])
            .then_state(|state| {
                assert!(!state.items[0].completed);
                assert_eq!(state.revision, 2);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 2))
            .run();
    }

    #[test]
    fn delete_twice_second_is_noop() {
        let storage = InMemoryStorage::new();
        let id = ItemId::new("b");
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::ready_with(vec![
                item("b", "Eggs", false),
                item("a", "Milk", false),
            ]))
            .when_actions([
                ListAction::DeleteItem { id: id.clone() },
                ListAction::DeleteItem { id },
            ])
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.items[0].text, "Milk");
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn update_item_trims_and_rejects_blank() {
        let storage = InMemoryStorage::new();
        let id = ItemId::new("a");
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::ready_with(vec![item("a", "Milk", false)]))
            .when_actions([
                ListAction::UpdateItem {
                    id: id.clone(),
                    text: "  ".to_string(),
                },
                ListAction::UpdateItem {
                    id: ItemId::new("missing"),
                    text: "Bread".to_string(),
                },
                ListAction::UpdateItem {
                    id,
                    text: " Oat milk ".to_string(),
                },
            ])
            .then_state(|state| {
                assert_eq!(state.items[0].text, "Oat milk");
                assert_eq!(state.revision, 1);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn clear_completed_always_writes() {
        let storage = InMemoryStorage::new();
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::ready_with(vec![
                item("c", "Bread", true),
                item("b", "Eggs", false),
                item("a", "Milk", true),
            ]))
            .when_actions([ListAction::ClearCompleted, ListAction::ClearCompleted])
            .then_state(|state| {
                let texts: Vec<_> = state.items.iter().map(|i| i.text.as_str()).collect();
                assert_eq!(texts, ["Eggs"]);
                assert_eq!(state.revision, 2);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 2))
            .run();
    }

    #[test]
    fn hydration_result_applies_once() {
        let storage = InMemoryStorage::new();
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::new())
            .when_actions([
                ListAction::Hydrated {
                    items: vec![item("a", "Milk", false)],
                },
                ListAction::Hydrated {
                    items: vec![item("b", "Eggs", false)],
                },
                ListAction::HydrationFailed {
                    reason: "late".to_string(),
                },
            ])
            .then_state(|state| {
                assert!(state.ready);
                assert_eq!(state.items, vec![item("a", "Milk", false)]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn hydration_trims_text_and_drops_blank_items() {
        let storage = InMemoryStorage::new();
        ReducerTest::new(ListReducer::new())
            .with_env(test_env(&storage))
            .given_state(ListState::new())
            .when_action(ListAction::Hydrated {
                items: vec![
                    item("c", "   ", false),
                    item("b", "  Eggs ", true),
                    item("a", "", false),
                ],
            })
            .then_state(|state| {
                assert!(state.ready);
                assert_eq!(state.items, vec![item("b", "Eggs", true)]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn hydrate_effect_loads_saved_items() {
        let saved = vec![item("b", "Eggs", false), item("a", "Milk", true)];
        let storage = InMemoryStorage::with_record(
            DEFAULT_STORAGE_KEY,
            crate::persistence::encode_items(&saved).unwrap(),
        );
        let env = test_env(&storage);
        let mut state = ListState::new();

        let effects = ListReducer::new().reduce(&mut state, ListAction::Hydrate, &env);
        let produced = run_effects(effects).await;

        assert_eq!(produced, vec![ListAction::Hydrated { items: saved }]);
    }

    #[tokio::test]
    async fn hydrate_effect_handles_missing_and_malformed_records() {
        let storage = InMemoryStorage::new();
        let mut state = ListState::new();
        let effects = ListReducer::new().reduce(&mut state, ListAction::Hydrate, &test_env(&storage));
        assert_eq!(
            run_effects(effects).await,
            vec![ListAction::Hydrated { items: vec![] }]
        );

        let storage = InMemoryStorage::with_record(DEFAULT_STORAGE_KEY, "[{\"id\":");
        let effects = ListReducer::new().reduce(&mut state, ListAction::Hydrate, &test_env(&storage));
        let produced = run_effects(effects).await;
        assert!(matches!(
            produced.as_slice(),
            [ListAction::HydrationFailed { .. }]
        ));
    }

    #[tokio::test]
    async fn write_effect_stores_whole_collection() {
        let storage = InMemoryStorage::new();
        let env = test_env(&storage);
        let reducer = ListReducer::new();
        let mut state = ListState::ready_with(vec![]);

        let first = reducer.reduce(&mut state, add("Milk"), &env);
        let second = reducer.reduce(&mut state, add("Eggs"), &env);

        // Run the later write first; the earlier one must not overwrite it.
        assert!(run_effects(second).await.is_empty());
        assert!(run_effects(first).await.is_empty());

        assert_eq!(storage.write_count(), 1);
        let stored = decode_items(&storage.record(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored, state.items);
    }

    #[tokio::test]
    async fn custom_key_is_used() {
        let storage = InMemoryStorage::new();
        let env = test_env(&storage).with_key("groceries");
        let mut state = ListState::ready_with(vec![]);

        let effects = ListReducer::new().reduce(&mut state, add("Milk"), &env);
        run_effects(effects).await;

        assert!(storage.record("groceries").is_some());
        assert!(storage.record(DEFAULT_STORAGE_KEY).is_none());
    }
}
