//! Asynchronous action sequences.
//!
//! Each sequence talks to the backend through the store's environment and
//! sends the resulting actions to the store. Failures are returned to the
//! caller only: nothing is sent to the store when a request fails, so a
//! failed fetch leaves the status at `Loading`.

use crate::api::ApiError;
use crate::app::{AppState, AppStore};
use crate::types::{Todo, TodoAction};
use std::sync::Arc;

/// Load every record from the backend
///
/// Sends `TodosLoading`, waits for the backend, then sends `TodosLoaded`.
///
/// # Errors
///
/// Returns the backend error if the fetch fails.
#[tracing::instrument(skip(store), err)]
pub async fn fetch_todos(store: &AppStore) -> Result<Arc<AppState>, ApiError> {
    store.send(TodoAction::TodosLoading.into()).await;

    let todos = store.environment().api.fetch_todos().await?;
    tracing::debug!(count = todos.len(), "Fetched todos");

    Ok(store.send(TodoAction::TodosLoaded(todos).into()).await)
}

/// Create a record on the backend and add the stored record to the store
///
/// The record is added exactly as the backend returned it.
///
/// # Errors
///
/// Returns the backend error if the save fails.
#[tracing::instrument(skip(store), err)]
pub async fn save_new_todo(store: &AppStore, text: &str) -> Result<Todo, ApiError> {
    let todo = store.environment().api.save_todo(text).await?;
    tracing::debug!(id = %todo.id, "Saved todo");

    store.send(TodoAction::TodoAdded(todo.clone()).into()).await;
    Ok(todo)
}
