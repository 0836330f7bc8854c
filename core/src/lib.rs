//! # todo-flux Core
//!
//! Core traits and types for the todo-flux state architecture.
//!
//! This crate provides the fundamental abstractions for building a
//! unidirectional state container: typed actions are fed to a reducer, the
//! reducer produces the next state, and memoized selectors derive read-only
//! views from it.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, cheap to clone (shared branches live behind `Arc`)
//! - **Action**: A closed enum of every transition a feature accepts
//! - **Reducer**: Deterministic transition `(State, Action, Environment) → State`
//! - **Environment**: Injected dependencies available next to the state
//! - **Selector**: Memoized derivation keyed by the identity of its inputs
//!
//! ## Example
//!
//! ```
//! use todo_flux_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Reset,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!             CounterAction::Reset => state.count = 0,
//!         }
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

/// Reducer composition utilities
pub mod composition;

/// Memoized selectors keyed by input identity
pub mod selector;

/// Reducer module - The core trait for business logic
///
/// Reducers are deterministic transitions: `(State, Action, Environment) → State`.
///
/// A reducer receives a private working copy of the state. The runtime owns
/// the published snapshots and swaps in the working copy once the reducer
/// returns, so a reducer can never alter a snapshot someone else is reading.
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodosReducer {
    ///     type State = TodosState;
    ///     type Action = TodoAction;
    ///     type Environment = ();
    ///
    ///     fn reduce(&self, state: &mut TodosState, action: TodoAction, _env: &()) {
    ///         match action {
    ///             TodoAction::TodosLoading => state.status = LoadingStatus::Loading,
    ///             // ...
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into the next state
        ///
        /// # Arguments
        ///
        /// - `state`: The working copy to transition in place
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment);
    }
}

pub use composition::{CombinedReducer, ScopedReducer, combine_reducers, scope_reducer};
pub use reducer::Reducer;
pub use selector::{Memoized, SelectorInput};
