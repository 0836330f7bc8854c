//! Record store scenarios driven through the wire format of actions.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use serde_json::{Value, json};
use std::sync::Arc;
use todo_flux_testing::ReducerTest;
use todos::{
    AppAction, AppEnvironment, AppState, Color, FakeTodoBackend, Todo, TodoId, TodoSelectors,
    TodosState, app_reducer,
};

fn env() -> AppEnvironment {
    AppEnvironment::new(Arc::new(FakeTodoBackend::new()))
}

fn action(value: Value) -> AppAction {
    serde_json::from_value(value).unwrap()
}

/// `a` (active, uncolored) and `b` (completed, blue)
fn two_todos() -> AppState {
    let todos: Vec<Todo> = serde_json::from_value(json!([
        {"id": 0, "text": "a", "completed": false, "color": ""},
        {"id": 1, "text": "b", "completed": true, "color": "blue"}
    ]))
    .unwrap();
    AppState::with_todos(TodosState::with_todos(todos))
}

#[test]
fn completed_filter_shows_only_completed_ids() {
    ReducerTest::new(app_reducer())
        .with_env(env())
        .given_state(two_todos())
        .when_action(action(json!({
            "type": "filters/statusFilterChanged",
            "payload": "completed"
        })))
        .then_state(|state| {
            let selectors = TodoSelectors::new();
            assert_eq!(*selectors.filtered_todo_ids(state), vec![TodoId::new(1)]);
            assert_eq!(state.todos.get(TodoId::new(1)).unwrap().color, Some(Color::Blue));
        })
        .run();
}

#[test]
fn added_record_is_appended_at_the_end() {
    ReducerTest::new(app_reducer())
        .with_env(env())
        .given_state(two_todos())
        .when_action(action(json!({
            "type": "todos/todoAdded",
            "payload": {"id": 2, "text": "c", "completed": false, "color": ""}
        })))
        .then_state(|state| {
            let texts: Vec<&str> = state.todos.entities.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(texts, vec!["a", "b", "c"]);
            assert_eq!(state.todos.entities[2], Todo::new(TodoId::new(2), "c"));
        })
        .run();
}

#[test]
fn all_completed_then_cleared_leaves_nothing() {
    ReducerTest::new(app_reducer())
        .with_env(env())
        .given_state(two_todos())
        .when_actions([
            action(json!({"type": "todos/allCompleted"})),
            action(json!({"type": "todos/completedCleared"})),
        ])
        .then_state(|state| assert!(state.todos.entities.is_empty()))
        .run();
}

#[test]
fn deleting_missing_id_keeps_records() {
    ReducerTest::new(app_reducer())
        .with_env(env())
        .given_state(two_todos())
        .when_action(action(json!({"type": "todos/todoDeleted", "payload": 9})))
        .then_transition(|before, after| {
            assert_eq!(before.todos.entities, after.todos.entities);
            assert!(Arc::ptr_eq(&before.todos.entities, &after.todos.entities));
        })
        .run();
}

#[test]
fn unfiltered_ids_equal_all_ids() {
    let state = two_todos();
    let selectors = TodoSelectors::new();

    assert_eq!(selectors.filtered_todo_ids(&state), selectors.todo_ids(&state));
}

#[test]
fn color_selected_clears_with_empty_string() {
    ReducerTest::new(app_reducer())
        .with_env(env())
        .given_state(two_todos())
        .when_action(action(json!({
            "type": "todos/colorSelected",
            "payload": {"todoId": 1, "color": ""}
        })))
        .then_state(|state| assert_eq!(state.todos.get(TodoId::new(1)).unwrap().color, None))
        .run();
}
