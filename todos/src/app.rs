//! Application state: the record store and the view filters, combined.

use crate::api::TodoApi;
use crate::filters::{FilterAction, FilterState, FiltersReducer};
use crate::reducer::TodosReducer;
use crate::types::{TodoAction, TodosState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use todo_flux_core::composition::BoxedReducer;
use todo_flux_core::{CombinedReducer, combine_reducers, scope_reducer};
use todo_flux_runtime::Store;

/// Root state
///
/// Both slices are cheap to clone: records live behind `Arc` inside
/// [`TodosState`], filters behind their own `Arc`. A transition on one slice
/// leaves the other slice's allocation shared with the previous snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Record store
    pub todos: TodosState,
    /// View filters
    pub filters: Arc<FilterState>,
}

impl AppState {
    /// Creates a state with the given records and default filters
    #[must_use]
    pub fn with_todos(todos: TodosState) -> Self {
        Self {
            todos,
            filters: Arc::default(),
        }
    }
}

/// Every action the application store accepts
///
/// Serialized as the wrapped action itself, e.g.
/// `{"type": "todos/todoToggled", "payload": 3}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppAction {
    /// Record store action
    Todos(TodoAction),
    /// Filter action
    Filters(FilterAction),
}

impl AppAction {
    /// The record store action, if this is one
    #[must_use]
    pub fn into_todos(self) -> Option<TodoAction> {
        match self {
            Self::Todos(action) => Some(action),
            Self::Filters(_) => None,
        }
    }

    /// The filter action, if this is one
    #[must_use]
    pub fn into_filters(self) -> Option<FilterAction> {
        match self {
            Self::Filters(action) => Some(action),
            Self::Todos(_) => None,
        }
    }
}

impl From<TodoAction> for AppAction {
    fn from(action: TodoAction) -> Self {
        Self::Todos(action)
    }
}

impl From<FilterAction> for AppAction {
    fn from(action: FilterAction) -> Self {
        Self::Filters(action)
    }
}

/// Dependencies of the application
#[derive(Clone)]
pub struct AppEnvironment {
    /// Backend used by the async sequences
    pub api: Arc<dyn TodoApi>,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment").finish_non_exhaustive()
    }
}

/// Root reducer type
pub type AppReducer = CombinedReducer<AppState, AppAction, AppEnvironment>;

/// Store type of the application
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

fn no_env(_: &AppEnvironment) -> &() {
    &()
}

fn set_filters(app: &mut AppState, filters: FilterState) {
    if *app.filters != filters {
        app.filters = Arc::new(filters);
    }
}

/// Build the root reducer
///
/// Each slice reducer only sees its own actions; an action for the other
/// slice leaves its state (and its allocation) as it was.
#[must_use]
pub fn app_reducer() -> AppReducer {
    let reducers: Vec<BoxedReducer<AppState, AppAction, AppEnvironment>> = vec![
        Box::new(scope_reducer(
            TodosReducer::new(),
            |app: &AppState| &app.todos,
            |app: &mut AppState, todos: TodosState| app.todos = todos,
            AppAction::into_todos,
            no_env,
        )),
        Box::new(scope_reducer(
            FiltersReducer,
            |app: &AppState| app.filters.as_ref(),
            set_filters,
            AppAction::into_filters,
            no_env,
        )),
    ];

    combine_reducers(reducers)
}

/// Create a store with empty state around `environment`
#[must_use]
pub fn create_store(environment: AppEnvironment) -> AppStore {
    Store::new(AppState::default(), app_reducer(), environment)
}
