//! # Todolist
//!
//! The to-do list domain: a pure state-transition core over a small
//! item collection, with best-effort local persistence.
//!
//! ## Architecture
//!
//! - [`types`]: the state snapshot (filter + items) and the intent
//!   vocabulary, pinned to their persisted wire shape
//! - [`reducer`]: the pure transition function
//! - [`selectors`]: derived views (`visible_items`)
//! - [`bootstrap`]: wires a Store to a storage backend - load the last
//!   snapshot (or start empty) and persist after every transition
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use todolist::{bootstrap, ToDoAction, ToDoEnvironment};
//! use todolist_core::environment::RandomIdGenerator;
//! use todolist_storage::kv::MemoryStorage;
//!
//! # async fn example() {
//! let env = ToDoEnvironment::new(Arc::new(RandomIdGenerator));
//! let store = bootstrap(MemoryStorage::new(), env);
//!
//! store.send(ToDoAction::AddToDo { text: "buy milk".into() }).await;
//! let count = store.state(|s| s.count()).await;
//! assert_eq!(count, 1);
//! # }
//! ```

pub mod reducer;
pub mod selectors;
pub mod types;

pub use reducer::{ToDoEnvironment, ToDoReducer};
pub use selectors::visible_items;
pub use types::{AppState, Filter, ToDoAction, ToDoId, ToDoItem};

use todolist_runtime::Store;
use todolist_storage::kv::KeyValueStorage;
use todolist_storage::snapshot::SnapshotStore;

/// Fixed key the state snapshot is persisted under
pub const STORAGE_KEY: &str = "todolist-state";

/// The concrete store type for the to-do application
pub type ToDoStore = Store<AppState, ToDoAction, ToDoEnvironment, ToDoReducer>;

/// Build a store wired to `storage`
///
/// Loads the persisted snapshot from [`STORAGE_KEY`] - any missing,
/// unreadable, or malformed snapshot degrades to the default empty
/// state - and subscribes a listener that re-persists the state after
/// every transition. Persistence failures are swallowed; they never
/// reach the transition path.
#[must_use]
pub fn bootstrap<K>(storage: K, env: ToDoEnvironment) -> ToDoStore
where
    K: KeyValueStorage + 'static,
{
    let snapshots = SnapshotStore::new(storage, STORAGE_KEY);
    let initial = snapshots.load::<AppState>().unwrap_or_default();
    tracing::info!(items = initial.count(), filter = ?initial.filter, "bootstrapping store");

    let store = Store::new(initial, ToDoReducer::new(), env);
    store.subscribe(move |state: &AppState| snapshots.save(state));
    store
}
