//! In-memory backend for development and tests.
//!
//! [`FakeTodoBackend`] keeps records in memory and can be used two ways:
//! directly as a [`TodoApi`], or served over HTTP through [`router`] so that
//! [`HttpTodoApi`](crate::api::HttpTodoApi) has something to talk to.
//!
//! Every request suspends at least once before it is answered, like a real
//! network round trip would.

use crate::api::{ApiError, SaveTodoRequest, TODOS_PATH, TodoApi, TodoResponse, TodosResponse};
use crate::types::{Color, Todo, TodoId};
use async_trait::async_trait;
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory todo collection
#[derive(Clone, Debug, Default)]
pub struct FakeTodoBackend {
    todos: Arc<RwLock<Vec<Todo>>>,
    latency: Duration,
}

impl FakeTodoBackend {
    /// Creates an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(todos)),
            latency: Duration::ZERO,
        }
    }

    /// Creates a backend with a few sample records
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_todos(vec![
            Todo::new(TodoId::new(0), "Learn Rust").with_completed(true),
            Todo::new(TodoId::new(1), "Write the state core").with_color(Some(Color::Purple)),
            Todo::new(TodoId::new(2), "Ship it").with_color(Some(Color::Blue)),
        ])
    }

    /// Delays every response by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Copy of the stored records
    pub async fn todos(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    /// Stores a new record built from `text` and returns it
    pub async fn insert(&self, text: String) -> Todo {
        let mut todos = self.todos.write().await;
        let todo = Todo::new(next_todo_id(&todos), text);
        todos.push(todo.clone());
        tracing::debug!(id = %todo.id, "Stored new todo");
        todo
    }

    async fn simulate_network(&self) {
        if self.latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// HTTP router serving this backend
    pub fn router(self) -> Router {
        router(self)
    }
}

/// The id the next stored record gets: one past the largest, starting at 0
#[must_use]
pub fn next_todo_id(todos: &[Todo]) -> TodoId {
    todos
        .iter()
        .map(|todo| todo.id.get())
        .max()
        .map_or(TodoId::new(0), |max| TodoId::new(max + 1))
}

#[async_trait]
impl TodoApi for FakeTodoBackend {
    async fn fetch_todos(&self) -> Result<Vec<Todo>, ApiError> {
        self.simulate_network().await;
        Ok(self.todos().await)
    }

    async fn save_todo(&self, text: &str) -> Result<Todo, ApiError> {
        self.simulate_network().await;
        Ok(self.insert(text.to_string()).await)
    }
}

/// Build the HTTP router for `backend`
///
/// Serves `GET` and `POST` on `/fakeApi/todos`.
pub fn router(backend: FakeTodoBackend) -> Router {
    Router::new()
        .route(TODOS_PATH, get(list_todos).post(create_todo))
        .with_state(backend)
}

async fn list_todos(State(backend): State<FakeTodoBackend>) -> Json<TodosResponse> {
    backend.simulate_network().await;
    Json(TodosResponse {
        todos: backend.todos().await,
    })
}

async fn create_todo(
    State(backend): State<FakeTodoBackend>,
    Json(request): Json<SaveTodoRequest>,
) -> (StatusCode, Json<TodoResponse>) {
    backend.simulate_network().await;
    let todo = backend.insert(request.todo.text).await;
    (StatusCode::CREATED, Json(TodoResponse { todo }))
}
