//! Reducer logic for the to-do list.
//!
//! A pure transition function over two independent slices: only
//! `SetFilter` touches the filter, only the item intents touch the
//! collection. Intents referencing an id that does not exist are silent
//! no-ops - a stale UI reference is not an error in a single-actor
//! model. No intent produces effects; persistence is a store
//! subscription.

use std::sync::Arc;

use todolist_core::{
    effect::Effect, environment::IdGenerator, reducer::Reducer, SmallVec,
};

use crate::types::{AppState, ToDoAction, ToDoId, ToDoItem};

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct ToDoEnvironment {
    /// Source of fresh item identifiers
    pub id_gen: Arc<dyn IdGenerator>,
}

impl ToDoEnvironment {
    /// Creates a new `ToDoEnvironment`
    #[must_use]
    pub fn new(id_gen: Arc<dyn IdGenerator>) -> Self {
        Self { id_gen }
    }
}

/// Reducer for the to-do list
#[derive(Clone, Debug)]
pub struct ToDoReducer;

impl ToDoReducer {
    /// Creates a new `ToDoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ToDoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for ToDoReducer {
    type State = AppState;
    type Action = ToDoAction;
    type Environment = ToDoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ToDoAction::SetFilter { filter } => {
                state.filter = filter;
            }

            ToDoAction::AddToDo { text } => {
                let id = ToDoId::from_uuid(env.id_gen.generate());
                state
                    .to_do_items
                    .insert(id.clone(), ToDoItem::new(id, text));
            }

            ToDoAction::UpdateToDoText { id, text } => {
                if let Some(item) = state.to_do_items.get_mut(&id) {
                    item.text = text;
                }
            }

            ToDoAction::ToggleToDo { id } => {
                if let Some(item) = state.to_do_items.get_mut(&id) {
                    item.done = !item.done;
                }
            }

            ToDoAction::RemoveToDo { id } => {
                state.to_do_items.remove(&id);
            }

            ToDoAction::Unknown => {}
        }

        SmallVec::new()
    }
}
