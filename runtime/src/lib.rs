//! # todo-flux Runtime
//!
//! Runtime implementation for the todo-flux state architecture.
//!
//! This crate provides the Store runtime that serializes reducer execution and
//! publishes immutable state snapshots to readers and subscribers.
//!
//! ## Core Components
//!
//! - **Store**: Owns the current snapshot, the reducer, and the environment
//! - **Snapshot publishing**: Every transition produces a new `Arc<State>`;
//!   published snapshots are never mutated afterwards
//! - **Subscriptions**: `watch` receivers that are notified after each transition
//!
//! ## Example
//!
//! ```ignore
//! use todo_flux_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use std::sync::Arc;
use todo_flux_core::reducer::Reducer;
use tokio::sync::{Mutex, watch};

/// Prometheus metrics for observability
pub mod metrics;

use crate::metrics::StoreMetrics;

/// Store module - The runtime for reducers
///
/// Store runtime for coordinating reducer execution and snapshot publishing.
pub mod store {
    use super::{Arc, Mutex, Reducer, StoreMetrics, watch};
    use std::marker::PhantomData;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. The current state snapshot (an `Arc<S>` that is replaced, never mutated)
    /// 2. Reducer (transition logic)
    /// 3. Environment (injected dependencies, e.g. API clients used by async sequences)
    /// 4. Subscribers (notified with every new snapshot)
    ///
    /// Writers are serialized by a fair async mutex, so transitions apply in the
    /// order their `send` calls were enqueued. Readers go through the snapshot
    /// channel and never wait for a transition in progress.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(AppState::default(), app_reducer(), environment);
    ///
    /// store.send(TodoAction::TodoToggled(TodoId::new(1)).into()).await;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<Mutex<Arc<S>>>,
        published: Arc<watch::Sender<Arc<S>>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        _action: PhantomData<fn(A)>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        S: Clone + Send + Sync + 'static,
        A: Send + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let initial = Arc::new(initial_state);
            let (published, _) = watch::channel(Arc::clone(&initial));

            Self {
                state: Arc::new(Mutex::new(initial)),
                published: Arc::new(published),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                _action: PhantomData,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Waits for its turn on the writer lock
        /// 2. Calls the reducer on a private copy of the current snapshot
        /// 3. Publishes the copy as the new snapshot and notifies subscribers
        ///
        /// # Returns
        ///
        /// The snapshot produced by this action.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller and the
        /// previous snapshot stays current. Reducers should not panic.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Arc<S> {
            let mut current = self.state.lock().await;
            tracing::trace!("Acquired writer lock");

            let mut next = S::clone(&current);

            let start = std::time::Instant::now();
            {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();
                self.reducer.reduce(&mut next, action, &self.environment);
            }
            StoreMetrics::record_action(start.elapsed());

            let next = Arc::new(next);
            *current = Arc::clone(&next);
            self.published.send_replace(Arc::clone(&next));
            tracing::trace!(subscribers = self.published.receiver_count(), "Published snapshot");

            next
        }

        /// The latest published snapshot
        ///
        /// Never waits for a transition in progress.
        #[must_use]
        pub fn snapshot(&self) -> Arc<S> {
            Arc::clone(&self.published.borrow())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.entities.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.snapshot())
        }

        /// Subscribe to snapshots
        ///
        /// The receiver starts at the current snapshot and is marked changed
        /// after every subsequent `send`. Intermediate snapshots may be
        /// skipped by a slow subscriber; the latest one is always observable.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<Arc<S>> {
            let receiver = self.published.subscribe();
            StoreMetrics::record_subscribers(self.published.receiver_count());
            receiver
        }

        /// Number of live subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.published.receiver_count()
        }

        /// The injected environment
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.environment
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                published: Arc::clone(&self.published),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                _action: PhantomData,
            }
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("subscribers", &self.published.receiver_count())
                .finish_non_exhaustive()
        }
    }
}

// Re-export for convenience
pub use store::Store;

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct CounterState {
        count: i64,
        history: Arc<Vec<i64>>,
    }

    #[derive(Debug)]
    enum CounterAction {
        Add(i64),
        Noop,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = i64;

        fn reduce(&self, state: &mut CounterState, action: CounterAction, multiplier: &i64) {
            match action {
                CounterAction::Add(n) => {
                    state.count += n * multiplier;
                    let mut history = state.history.as_ref().clone();
                    history.push(state.count);
                    state.history = Arc::new(history);
                },
                CounterAction::Noop => {},
            }
        }
    }

    type CounterStore = Store<CounterState, CounterAction, i64, CounterReducer>;

    fn store() -> CounterStore {
        Store::new(CounterState::default(), CounterReducer, 1)
    }

    #[tokio::test]
    async fn test_send_publishes_new_snapshot() {
        let store = store();
        let before = store.snapshot();

        let after = store.send(CounterAction::Add(2)).await;

        assert_eq!(before.count, 0);
        assert_eq!(after.count, 2);
        assert!(Arc::ptr_eq(&after, &store.snapshot()));
    }

    #[tokio::test]
    async fn test_old_snapshots_are_never_mutated() {
        let store = store();
        store.send(CounterAction::Add(1)).await;
        let held = store.snapshot();

        store.send(CounterAction::Add(1)).await;
        store.send(CounterAction::Add(1)).await;

        assert_eq!(held.count, 1);
        assert_eq!(*held.history, vec![1]);
        assert_eq!(store.state(|s| s.count), 3);
    }

    #[tokio::test]
    async fn test_untouched_branches_keep_identity() {
        let store = store();
        store.send(CounterAction::Add(1)).await;
        let before = store.snapshot();

        let after = store.send(CounterAction::Noop).await;

        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&before.history, &after.history));
    }

    #[tokio::test]
    async fn test_environment_is_passed_to_reducer() {
        let store: CounterStore = Store::new(CounterState::default(), CounterReducer, 10);
        store.send(CounterAction::Add(3)).await;

        assert_eq!(*store.environment(), 10);
        assert_eq!(store.state(|s| s.count), 30);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = store();
        let mut rx = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);

        store.send(CounterAction::Add(5)).await;

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().count, 5);
    }

    #[tokio::test]
    async fn test_concurrent_sends_are_serialized() {
        let store = store();
        let mut tasks = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.send(CounterAction::Add(1)).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let state = store.snapshot();
        assert_eq!(state.count, 50);
        assert_eq!(state.history.len(), 50);
        assert_eq!(*state.history, (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn test_send_from_blocking_context() {
        let store = store();
        let state = tokio_test::block_on(store.send(CounterAction::Add(4)));
        assert_eq!(state.count, 4);
    }
}
