//! Derived views over [`AppState`].
//!
//! Plain selectors borrow straight from the snapshot. The list-shaped views
//! live in [`TodoSelectors`], whose caches are keyed by the identity of the
//! `Arc`s they read: as long as neither the records nor the filters were
//! replaced, a view returns the same `Arc` it returned last time.

use crate::app::AppState;
use crate::filters::FilterState;
use crate::types::{LoadingStatus, Todo, TodoId};
use std::sync::Arc;
use todo_flux_core::Memoized;

/// Every record, in order
#[must_use]
pub fn select_todos(state: &AppState) -> Arc<Vec<Todo>> {
    Arc::clone(&state.todos.entities)
}

/// The record with `id`, if any
#[must_use]
pub fn select_todo_by_id(state: &AppState, id: TodoId) -> Option<&Todo> {
    state.todos.get(id)
}

/// The loading flag
#[must_use]
pub fn select_loading_status(state: &AppState) -> LoadingStatus {
    state.todos.status
}

/// The records passing `filters`
///
/// With no status and no color restriction the input sequence itself is
/// returned.
#[must_use]
pub fn filter_todos(todos: &Arc<Vec<Todo>>, filters: &FilterState) -> Arc<Vec<Todo>> {
    if filters.is_unfiltered() {
        return Arc::clone(todos);
    }

    Arc::new(todos.iter().filter(|todo| filters.matches(todo)).cloned().collect())
}

fn ids_of(todos: &[Todo]) -> Arc<Vec<TodoId>> {
    Arc::new(todos.iter().map(|todo| todo.id).collect())
}

/// Memoized list views
///
/// One instance per consumer; each holds a single-entry cache per view.
pub struct TodoSelectors {
    todo_ids: Memoized<Arc<Vec<Todo>>, Arc<Vec<TodoId>>>,
    filtered_todos: Memoized<(Arc<Vec<Todo>>, Arc<FilterState>), Arc<Vec<Todo>>>,
    filtered_todo_ids: Memoized<Arc<Vec<Todo>>, Arc<Vec<TodoId>>>,
}

impl TodoSelectors {
    /// Creates selectors with empty caches
    #[must_use]
    pub fn new() -> Self {
        Self {
            todo_ids: Memoized::new(|todos: &Arc<Vec<Todo>>| ids_of(todos)),
            filtered_todos: Memoized::new(|(todos, filters): &(Arc<Vec<Todo>>, Arc<FilterState>)| {
                filter_todos(todos, filters)
            }),
            filtered_todo_ids: Memoized::new(|todos: &Arc<Vec<Todo>>| ids_of(todos)),
        }
    }

    /// Ids of every record, in order
    pub fn todo_ids(&self, state: &AppState) -> Arc<Vec<TodoId>> {
        self.todo_ids.select(Arc::clone(&state.todos.entities))
    }

    /// Records passing the current filters
    pub fn filtered_todos(&self, state: &AppState) -> Arc<Vec<Todo>> {
        self.filtered_todos
            .select((Arc::clone(&state.todos.entities), Arc::clone(&state.filters)))
    }

    /// Ids of the records passing the current filters
    pub fn filtered_todo_ids(&self, state: &AppState) -> Arc<Vec<TodoId>> {
        self.filtered_todo_ids.select(self.filtered_todos(state))
    }
}

impl Default for TodoSelectors {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodoSelectors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoSelectors").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::app::app_reducer;
    use crate::filters::{ColorChange, FilterAction, StatusFilter};
    use crate::types::{Color, TodoAction, TodosState};
    use crate::{app::AppEnvironment, fake_api::FakeTodoBackend};
    use todo_flux_core::Reducer;

    fn todo(id: u64) -> Todo {
        Todo::new(TodoId::new(id), format!("todo {id}"))
    }

    fn ids(values: &[u64]) -> Vec<TodoId> {
        values.iter().copied().map(TodoId::new).collect()
    }

    fn state_with(todos: Vec<Todo>) -> AppState {
        AppState::with_todos(TodosState::with_todos(todos))
    }

    fn apply(state: &AppState, action: impl Into<crate::app::AppAction>) -> AppState {
        let env = AppEnvironment::new(Arc::new(FakeTodoBackend::new()));
        let mut next = state.clone();
        app_reducer().reduce(&mut next, action.into(), &env);
        next
    }

    #[test]
    fn test_select_todo_by_id() {
        let state = state_with(vec![todo(0), todo(4)]);

        assert_eq!(select_todo_by_id(&state, TodoId::new(4)).unwrap().text, "todo 4");
        assert!(select_todo_by_id(&state, TodoId::new(9)).is_none());
        assert_eq!(select_todos(&state).len(), 2);
        assert_eq!(select_loading_status(&state), LoadingStatus::Idle);
    }

    #[test]
    fn test_filtered_by_status_and_color() {
        let state = state_with(vec![
            todo(1).with_color(Some(Color::Red)),
            todo(2).with_completed(true).with_color(Some(Color::Red)),
            todo(3).with_color(Some(Color::Blue)),
        ]);
        let state = apply(&state, FilterAction::StatusFilterChanged(StatusFilter::Active));
        let state = apply(
            &state,
            FilterAction::ColorFilterChanged {
                color: Color::Red,
                change: ColorChange::Added,
            },
        );

        let selectors = TodoSelectors::new();
        assert_eq!(*selectors.filtered_todo_ids(&state), ids(&[1]));
    }

    #[test]
    fn test_uncolored_todo_excluded_by_color_filter() {
        let state = state_with(vec![todo(0), todo(1).with_color(Some(Color::Green))]);
        let state = apply(
            &state,
            FilterAction::ColorFilterChanged {
                color: Color::Green,
                change: ColorChange::Added,
            },
        );

        assert_eq!(*TodoSelectors::new().filtered_todo_ids(&state), ids(&[1]));
    }

    #[test]
    fn test_completed_filter() {
        let state = state_with(vec![todo(0), todo(1).with_completed(true)]);
        let state = apply(&state, FilterAction::StatusFilterChanged(StatusFilter::Completed));

        assert_eq!(*TodoSelectors::new().filtered_todo_ids(&state), ids(&[1]));
    }

    #[test]
    fn test_unfiltered_view_is_the_record_sequence() {
        let state = state_with(vec![todo(0), todo(1).with_completed(true)]);
        let selectors = TodoSelectors::new();

        assert!(Arc::ptr_eq(&selectors.filtered_todos(&state), &state.todos.entities));
        assert_eq!(selectors.filtered_todo_ids(&state), selectors.todo_ids(&state));
    }

    #[test]
    fn test_todo_ids_memoized_until_records_change() {
        let state = state_with(vec![todo(0), todo(1)]);
        let selectors = TodoSelectors::new();

        let first = selectors.todo_ids(&state);
        assert!(Arc::ptr_eq(&first, &selectors.todo_ids(&state)));

        // Filter changes leave the records alone
        let filtered = apply(&state, FilterAction::StatusFilterChanged(StatusFilter::Active));
        assert!(Arc::ptr_eq(&first, &selectors.todo_ids(&filtered)));

        // No-op transitions keep the records too
        let unchanged = apply(&filtered, TodoAction::TodoDeleted(TodoId::new(42)));
        assert!(Arc::ptr_eq(&first, &selectors.todo_ids(&unchanged)));

        let toggled = apply(&unchanged, TodoAction::TodoToggled(TodoId::new(0)));
        let second = selectors.todo_ids(&toggled);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_filtered_todos_recomputed_on_filter_change() {
        let state = state_with(vec![todo(0), todo(1).with_completed(true)]);
        let selectors = TodoSelectors::new();

        let all = selectors.filtered_todos(&state);
        let active_state = apply(&state, FilterAction::StatusFilterChanged(StatusFilter::Active));
        let active = selectors.filtered_todos(&active_state);

        assert!(!Arc::ptr_eq(&all, &active));
        assert_eq!(active.len(), 1);
        assert!(Arc::ptr_eq(&active, &selectors.filtered_todos(&active_state)));
    }
}
