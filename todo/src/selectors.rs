//! Derived views over the application state.

use crate::types::{AppState, ToDoItem};

/// The items visible under the current filter
///
/// Recomputed from scratch on every call - no cached derived state, so
/// the result depends only on the snapshot passed in. Order follows map
/// iteration and is not meaningful.
#[must_use]
pub fn visible_items(state: &AppState) -> Vec<&ToDoItem> {
    state
        .to_do_items
        .values()
        .filter(|item| state.filter.admits(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Filter, ToDoId, ToDoItem};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn mixed_state(filter: Filter) -> AppState {
        let mut state = AppState::new();
        for n in 1..=4u128 {
            let id = ToDoId::from_uuid(Uuid::from_u128(n));
            let mut item = ToDoItem::new(id.clone(), format!("item {n}"));
            item.done = n % 2 == 0;
            state.to_do_items.insert(id, item);
        }
        state.filter = filter;
        state
    }

    #[test]
    fn all_shows_everything() {
        assert_eq!(visible_items(&mixed_state(Filter::All)).len(), 4);
    }

    #[test]
    fn done_and_undone_split_the_collection() {
        let done: HashSet<_> = visible_items(&mixed_state(Filter::Done))
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        let undone: HashSet<_> = visible_items(&mixed_state(Filter::Undone))
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        let all: HashSet<_> = visible_items(&mixed_state(Filter::All))
            .into_iter()
            .map(|item| item.id.clone())
            .collect();

        assert_eq!(done.len(), 2);
        assert_eq!(undone.len(), 2);
        assert!(done.is_disjoint(&undone));
        assert_eq!(done.union(&undone).cloned().collect::<HashSet<_>>(), all);
    }

    #[test]
    fn empty_state_yields_empty_view() {
        assert!(visible_items(&AppState::new()).is_empty());
    }
}
