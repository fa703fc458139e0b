//! Domain types for the to-do list.
//!
//! The application state is two independent slices: the active filter
//! and the item collection, keyed by id. Serde attributes pin the
//! persisted snapshot to its fixed wire shape:
//! `{"filter": "all", "toDoItems": {<id>: {"uuid", "text", "done"}}}`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a to-do item
///
/// Opaque, assigned at creation, immutable thereafter. Fresh ids come
/// from the environment's `IdGenerator`, not from this type, so the
/// reducer stays deterministic under test.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToDoId(Uuid);

impl ToDoId {
    /// Creates a `ToDoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ToDoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ToDoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoItem {
    /// Unique identifier; `uuid` on the wire
    #[serde(rename = "uuid")]
    pub id: ToDoId,
    /// The item text
    pub text: String,
    /// Whether the item is marked done
    pub done: bool,
}

impl ToDoItem {
    /// Creates a new, not-done item
    #[must_use]
    pub const fn new(id: ToDoId, text: String) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }
}

/// Which items are visible
///
/// Exactly one filter is active at a time; it is independent of the
/// item collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Show every item
    #[default]
    All,
    /// Show only items marked done
    Done,
    /// Show only items not yet done
    Undone,
}

impl Filter {
    /// Whether `item` is visible under this filter
    #[must_use]
    pub const fn admits(self, item: &ToDoItem) -> bool {
        match self {
            Self::All => true,
            Self::Done => item.done,
            Self::Undone => !item.done,
        }
    }
}

/// The whole application state: filter plus item collection
///
/// Iteration order of the map is not meaningful. `Default` is the
/// initial state used when no valid snapshot exists: filter `All`,
/// no items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// The active filter
    pub filter: Filter,
    /// All items, keyed by id
    #[serde(rename = "toDoItems")]
    pub to_do_items: HashMap<ToDoId, ToDoItem>,
}

impl AppState {
    /// Creates the initial empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.to_do_items.len()
    }

    /// Returns the number of items marked done
    #[must_use]
    pub fn done_count(&self) -> usize {
        self.to_do_items.values().filter(|item| item.done).count()
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: &ToDoId) -> Option<&ToDoItem> {
        self.to_do_items.get(id)
    }

    /// Checks whether an item exists
    #[must_use]
    pub fn exists(&self, id: &ToDoId) -> bool {
        self.to_do_items.contains_key(id)
    }
}

/// User intents driving state transitions
///
/// A closed, tagged vocabulary; each intent carries only the data
/// needed to apply it. The serde tags are the wire names the UI layer
/// dispatches with. An unrecognized tag deserializes to [`Unknown`],
/// which the reducer treats as a no-op, so newer dispatchers do not
/// break older cores.
///
/// [`Unknown`]: ToDoAction::Unknown
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToDoAction {
    /// Replace the active filter wholesale
    #[serde(rename = "SET_FILTER")]
    SetFilter {
        /// The filter to activate
        filter: Filter,
    },

    /// Insert a new item with a fresh id and `done: false`
    ///
    /// The text is stored verbatim; trimming surrounding whitespace is
    /// the dispatcher's responsibility.
    #[serde(rename = "ADD_TODO")]
    AddToDo {
        /// Text for the new item
        text: String,
    },

    /// Replace an existing item's text; no-op if the id is absent
    #[serde(rename = "UPDATE_TODO_TEXT")]
    UpdateToDoText {
        /// Item to edit
        #[serde(rename = "uuid")]
        id: ToDoId,
        /// Replacement text
        text: String,
    },

    /// Flip an existing item's done flag; no-op if the id is absent
    #[serde(rename = "TOGGLE_TODO")]
    ToggleToDo {
        /// Item to toggle
        #[serde(rename = "uuid")]
        id: ToDoId,
    },

    /// Remove an item; no-op if the id is absent
    #[serde(rename = "REMOVE_TODO")]
    RemoveToDo {
        /// Item to remove
        #[serde(rename = "uuid")]
        id: ToDoId,
    },

    /// Unrecognized intent tag; always a no-op
    #[serde(other)]
    Unknown,
}
