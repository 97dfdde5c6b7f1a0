//! Shopping list state core.
//!
//! An ordered collection of items (most recent first) with completion flags,
//! a view filter, derived counts, and a load/save lifecycle against a
//! key/value persistence primitive. Rendering is a separate adapter that
//! reads snapshots and re-renders on change.
//!
//! - [`ListReducer`]: all list logic, as a reducer over [`ListState`]
//! - [`ListStore`]: the facade UI code calls
//! - [`JsonFileStorage`]: file-backed persistence
//! - [`TextRenderer`]: plain-text view
//!
//! # Quick Start
//!
//! ```no_run
//! use shopping_list::{JsonFileStorage, ListEnvironment, ListStore, Filter};
//! use shopping_list_core::environment::{SystemClock, UuidIdGenerator};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let env = ListEnvironment::new(
//!     Arc::new(JsonFileStorage::new("./data")),
//!     Arc::new(SystemClock),
//!     Arc::new(UuidIdGenerator),
//! );
//! let list = ListStore::open(env).await;
//!
//! list.add_item("Milk").await;
//! list.add_item("Eggs").await;
//! list.set_filter(Filter::Active).await;
//!
//! println!("{}", list.snapshot().await.items_left_label());
//! # }
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod reducer;
pub mod render;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

pub use config::ListConfig;
pub use error::{ConfigError, HydrationError, PersistenceWriteError};
pub use persistence::{DEFAULT_STORAGE_KEY, Persistence, WriteOutcome};
pub use reducer::{ListEnvironment, ListReducer};
pub use render::{Renderer, TextRenderer};
pub use storage::{JsonFileStorage, KeyValueStorage, StorageError};
pub use store::ListStore;
pub use types::{Filter, Item, ItemId, ListAction, ListState, ParseFilterError, Timestamp};
pub use view::ListSnapshot;
