//! Integration tests for Store snapshot publishing
//!
//! Subscribers observe every snapshot they are scheduled between, old
//! snapshots stay as they were, and readers never wait for writers.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use std::sync::Arc;
use std::time::Duration;
use todo_flux_core::composition::BoxedReducer;
use todo_flux_core::{Reducer, combine_reducers, scope_reducer};
use todo_flux_runtime::Store;
use todo_flux_testing::SnapshotRecorder;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
struct ListState {
    loading: bool,
    items: Arc<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct AppState {
    list: ListState,
    query: Arc<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum ListAction {
    Loading,
    Loaded(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
enum AppAction {
    List(ListAction),
    Search(String),
}

struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ();

    fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &()) {
        match action {
            ListAction::Loading => state.loading = true,
            ListAction::Loaded(items) => {
                state.loading = false;
                state.items = Arc::new(items);
            }
        }
    }
}

struct SearchReducer;

impl Reducer for SearchReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = ();

    fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &()) {
        if let AppAction::Search(query) = action {
            state.query = Arc::new(query);
        }
    }
}

type AppStore = Store<AppState, AppAction, (), todo_flux_core::CombinedReducer<AppState, AppAction, ()>>;

fn app_store() -> AppStore {
    let reducers: Vec<BoxedReducer<AppState, AppAction, ()>> = vec![
        Box::new(scope_reducer(
            ListReducer,
            |app: &AppState| &app.list,
            |app: &mut AppState, list: ListState| app.list = list,
            |action: AppAction| match action {
                AppAction::List(action) => Some(action),
                AppAction::Search(_) => None,
            },
            |env: &()| env,
        )),
        Box::new(SearchReducer),
    ];

    Store::new(AppState::default(), combine_reducers(reducers), ())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_subscriber_sees_each_snapshot_in_order() {
    let store = app_store();
    let recorder = SnapshotRecorder::start(store.subscribe());

    store.send(AppAction::List(ListAction::Loading)).await;
    tokio::task::yield_now().await;
    store
        .send(AppAction::List(ListAction::Loaded(vec!["a".to_string()])))
        .await;
    tokio::task::yield_now().await;

    recorder.wait_for(2, Duration::from_secs(1)).await.unwrap();
    let snapshots = recorder.snapshots();
    assert!(snapshots[0].list.loading);
    assert!(!snapshots[1].list.loading);
    assert_eq!(*snapshots[1].list.items, vec!["a".to_string()]);
}

#[tokio::test]
async fn test_old_snapshots_are_never_mutated() {
    let store = app_store();

    let before = store.snapshot();
    let after = store.send(AppAction::Search("milk".to_string())).await;

    assert_eq!(*before, AppState::default());
    assert_eq!(*after.query, "milk");
    assert!(Arc::ptr_eq(&before.list.items, &after.list.items));
}

#[tokio::test]
async fn test_slice_actions_keep_other_branches_shared() {
    let store = app_store();
    let searched = store.send(AppAction::Search("x".to_string())).await;
    let loaded = store
        .send(AppAction::List(ListAction::Loaded(vec!["b".to_string()])))
        .await;

    assert!(Arc::ptr_eq(&searched.query, &loaded.query));
    assert!(!Arc::ptr_eq(&searched.list.items, &loaded.list.items));
}

#[tokio::test]
async fn test_late_subscriber_starts_at_current_snapshot() {
    let store = app_store();
    store.send(AppAction::Search("first".to_string())).await;

    let updates = store.subscribe();
    assert_eq!(*updates.borrow().query, "first");
    assert!(!updates.has_changed().unwrap());
    assert_eq!(store.subscriber_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_senders_are_serialized() {
    let store = app_store();
    let mut handles = Vec::new();

    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.send(AppAction::Search(format!("q{i}"))).await;
            store
                .send(AppAction::List(ListAction::Loaded(vec![format!("item{i}")])))
                .await
        }));
    }

    for handle in handles {
        let snapshot = handle.await.unwrap();
        assert_eq!(snapshot.list.items.len(), 1);
    }

    let final_state = store.snapshot();
    assert_eq!(final_state.list.items.len(), 1);
    assert!(!final_state.list.loading);
}
