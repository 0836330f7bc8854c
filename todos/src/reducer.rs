//! Reducer logic for the todo record store.
//!
//! Every transition works on a private copy of the state handed in by the
//! store. When the records change, a new sequence is installed in
//! `entities`; when they do not (unknown id, nothing to clear), `entities` is
//! left pointing at the previous sequence so memoized selectors keep their
//! cached results.

use crate::types::{LoadingStatus, Todo, TodoAction, TodoId, TodosState};
use std::sync::Arc;
use todo_flux_core::reducer::Reducer;

/// Reducer for the todo record store
#[derive(Clone, Debug)]
pub struct TodosReducer;

impl TodosReducer {
    /// Creates a new `TodosReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies `update` to the record with `id`, if there is one
    fn update_todo(state: &mut TodosState, id: TodoId, update: impl FnOnce(&mut Todo)) {
        let Some(index) = state.entities.iter().position(|t| t.id == id) else {
            return;
        };

        let mut entities = state.entities.as_ref().clone();
        update(&mut entities[index]);
        state.entities = Arc::new(entities);
    }

    /// Keeps only the records matching `keep`, if any record is dropped
    fn retain_todos(state: &mut TodosState, keep: impl Fn(&Todo) -> bool) {
        if state.entities.iter().all(&keep) {
            return;
        }

        let entities = state.entities.iter().filter(|t| keep(t)).cloned().collect();
        state.entities = Arc::new(entities);
    }
}

impl Default for TodosReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodosReducer {
    type State = TodosState;
    type Action = TodoAction;
    type Environment = ();

    fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) {
        match action {
            TodoAction::TodosLoading => {
                state.status = LoadingStatus::Loading;
            }
            TodoAction::TodosLoaded(todos) => {
                state.status = LoadingStatus::Idle;
                state.entities = Arc::new(todos);
            }
            TodoAction::TodoAdded(todo) => {
                let mut entities = Vec::with_capacity(state.entities.len() + 1);
                entities.extend_from_slice(&state.entities);
                entities.push(todo);
                state.entities = Arc::new(entities);
            }
            TodoAction::TodoToggled(id) => {
                Self::update_todo(state, id, |todo| todo.completed = !todo.completed);
            }
            TodoAction::ColorSelected { todo_id, color } => {
                Self::update_todo(state, todo_id, |todo| todo.color = color);
            }
            TodoAction::TodoDeleted(id) => {
                Self::retain_todos(state, |todo| todo.id != id);
            }
            TodoAction::AllCompleted => {
                if state.entities.iter().all(|t| t.completed) {
                    return;
                }
                let entities = state
                    .entities
                    .iter()
                    .cloned()
                    .map(|todo| todo.with_completed(true))
                    .collect();
                state.entities = Arc::new(entities);
            }
            TodoAction::CompletedCleared => {
                Self::retain_todos(state, |todo| !todo.completed);
            }
        }
    }
}
