//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on a slice of state and the subset of
//!   actions addressed to that slice
//!
//! Composition is how a root state is assembled from feature slices that share
//! one dispatch channel: every slice sees every action, and a slice that does
//! not recognize an action leaves its state untouched.
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use todo_flux_core::Reducer;
//! use todo_flux_core::composition::{BoxedReducer, combine_reducers};
//!
//! #[derive(Clone)]
//! struct MyState {
//!     count: i32,
//!     name: String,
//! }
//!
//! #[derive(Clone)]
//! enum MyAction {
//!     Increment,
//!     SetName(String),
//! }
//!
//! struct CounterReducer;
//! struct NameReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = MyState;
//!     type Action = MyAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut MyState, action: MyAction, _env: &()) {
//!         if matches!(action, MyAction::Increment) {
//!             state.count += 1;
//!         }
//!     }
//! }
//!
//! impl Reducer for NameReducer {
//!     type State = MyState;
//!     type Action = MyAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut MyState, action: MyAction, _env: &()) {
//!         if let MyAction::SetName(name) = action {
//!             state.name = name;
//!         }
//!     }
//! }
//!
//! let reducers: Vec<BoxedReducer<MyState, MyAction, ()>> =
//!     vec![Box::new(CounterReducer), Box::new(NameReducer)];
//! let combined = combine_reducers(reducers);
//! let mut state = MyState { count: 0, name: String::new() };
//! combined.reduce(&mut state, MyAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

use crate::reducer::Reducer;
use std::marker::PhantomData;

/// A boxed reducer that can be shared with the runtime.
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence with its own clone of the action, in the
/// order given.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of reducers in this combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether this combination contains no reducers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        for reducer in &self.reducers {
            reducer.reduce(state, action.clone(), env);
        }
    }
}

/// Scopes a reducer to a slice of a larger state.
///
/// - `get_state` / `set_state` select and write back the slice.
/// - `to_action` extracts the child action from the parent action; `None`
///   means the action belongs to another slice and the state is left as is
///   (the slice is not even written back).
/// - `to_env` projects the parent environment onto the child's.
///
/// # Examples
///
/// ```
/// use todo_flux_core::Reducer;
/// use todo_flux_core::composition::scope_reducer;
///
/// #[derive(Clone, Default)]
/// struct CounterState {
///     count: i32,
/// }
///
/// enum CounterAction {
///     Increment,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = CounterState;
///     type Action = CounterAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) {
///         match action {
///             CounterAction::Increment => state.count += 1,
///         }
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: CounterState,
///     title: String,
/// }
///
/// enum AppAction {
///     Counter(CounterAction),
///     Rename(String),
/// }
///
/// let scoped = scope_reducer(
///     CounterReducer,
///     |app: &AppState| &app.counter,
///     |app: &mut AppState, counter: CounterState| app.counter = counter,
///     |action: AppAction| match action {
///         AppAction::Counter(action) => Some(action),
///         AppAction::Rename(_) => None,
///     },
///     |_: &()| &(),
/// );
///
/// let mut state = AppState::default();
/// scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
/// scoped.reduce(&mut state, AppAction::Rename("ignored".to_string()), &());
/// assert_eq!(state.counter.count, 1);
/// ```
pub fn scope_reducer<S, SubS, A, SubA, E, SubE, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    to_action: fn(A) -> Option<SubA>,
    to_env: fn(&E) -> &SubE,
) -> ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        to_action,
        to_env,
        _phantom: PhantomData,
    }
}

/// A scoped reducer that operates on a slice of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    to_action: fn(A) -> Option<SubA>,
    to_env: fn(&E) -> &SubE,
    _phantom: PhantomData<fn(&S, &E)>,
}

impl<S, SubS, A, SubA, E, SubE, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        let Some(action) = (self.to_action)(action) else {
            return;
        };

        let mut sub_state = (self.get_state)(state).clone();
        self.reducer.reduce(&mut sub_state, action, (self.to_env)(env));
        (self.set_state)(state, sub_state);
    }
}
