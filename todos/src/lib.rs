//! To-do list state core.
//!
//! A single store holds the to-do records and the view filters. Synchronous
//! transitions go through the store's reducer; the two backend round trips
//! (load everything, create one record) are async sequences that send actions
//! to the store around their network call. Read-only views are derived
//! through memoized selectors.
//!
//! - [`types`]: records, ids, colors, record store state and actions
//! - [`reducer`]: record store transitions
//! - [`filters`]: status and color filters
//! - [`app`]: root state, action, environment and store
//! - [`selectors`]: derived views
//! - [`thunks`]: async sequences
//! - [`api`] / [`fake_api`]: backend protocol, HTTP client, in-memory backend
//! - [`config`]: environment configuration
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todos::{AppEnvironment, FakeTodoBackend, TodoAction, TodoSelectors, create_store};
//! use todos::thunks::{fetch_todos, save_new_todo};
//!
//! # async fn example() -> Result<(), todos::ApiError> {
//! let store = create_store(AppEnvironment::new(Arc::new(FakeTodoBackend::seeded())));
//!
//! fetch_todos(&store).await?;
//! let todo = save_new_todo(&store, "Buy milk").await?;
//! store.send(TodoAction::TodoToggled(todo.id).into()).await;
//!
//! let selectors = TodoSelectors::new();
//! let visible = selectors.filtered_todo_ids(&store.snapshot());
//! println!("Visible: {visible:?}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod fake_api;
pub mod filters;
pub mod reducer;
pub mod selectors;
pub mod thunks;
pub mod types;

// Re-export commonly used types
pub use api::{ApiError, HttpTodoApi, TodoApi};
pub use app::{AppAction, AppEnvironment, AppState, AppStore, app_reducer, create_store};
pub use config::Config;
pub use fake_api::FakeTodoBackend;
pub use filters::{ColorChange, FilterAction, FilterState, FiltersReducer, StatusFilter};
pub use reducer::TodosReducer;
pub use selectors::TodoSelectors;
pub use types::{Color, LoadingStatus, Todo, TodoAction, TodoId, TodosState};
