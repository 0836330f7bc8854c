//! Backend API for todo records.
//!
//! The backend exposes a single resource:
//!
//! - `GET  /fakeApi/todos` responds `{"todos": [Todo, ...]}`
//! - `POST /fakeApi/todos` with `{"todo": {"text": ...}}` responds
//!   `{"todo": Todo}` carrying the server-assigned id
//!
//! [`TodoApi`] is the seam the async sequences call through; [`HttpTodoApi`]
//! speaks the protocol above over HTTP.

use crate::types::Todo;
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use todo_flux_runtime::metrics::ApiMetrics;

/// Path of the todo collection resource
pub const TODOS_PATH: &str = "/fakeApi/todos";

/// Errors from backend requests
#[derive(Error, Debug)]
pub enum ApiError {
    /// The configured base URL cannot be used
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// URL as configured
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Backend responded {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The response body did not have the expected shape
    #[error("Malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Response of `GET /fakeApi/todos`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodosResponse {
    /// Every stored record
    pub todos: Vec<Todo>,
}

/// Response of `POST /fakeApi/todos`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    /// The created record
    pub todo: Todo,
}

/// Client-supplied part of a new record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    /// Text of the todo
    pub text: String,
}

/// Request body of `POST /fakeApi/todos`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTodoRequest {
    /// The record to create
    pub todo: NewTodo,
}

impl SaveTodoRequest {
    /// Wraps `text` in the request envelope
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            todo: NewTodo { text: text.into() },
        }
    }
}

/// Backend operations used by the async sequences
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// Fetch every stored record, in server order
    async fn fetch_todos(&self) -> Result<Vec<Todo>, ApiError>;

    /// Create a record from `text` and return it as stored
    async fn save_todo(&self, text: &str) -> Result<Todo, ApiError>;
}

/// [`TodoApi`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: reqwest::Client,
    todos_url: Url,
}

impl HttpTodoApi {
    /// Creates a client for the backend at `base_url`
    ///
    /// Requests carry no deadline unless `timeout` is given.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// URL, or [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        let todos_url = base.join(TODOS_PATH).map_err(|e| invalid(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            todos_url,
        })
    }

    /// URL of the todo collection
    #[must_use]
    pub const fn todos_url(&self) -> &Url {
        &self.todos_url
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        response.json().await.map_err(ApiError::Decode)
    }

    fn record<T>(operation: &'static str, start: Instant, result: &Result<T, ApiError>) {
        ApiMetrics::record_request(operation, start.elapsed());
        if result.is_err() {
            ApiMetrics::record_error(operation);
        }
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    #[tracing::instrument(skip(self), fields(url = %self.todos_url))]
    async fn fetch_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let start = Instant::now();

        let result: Result<Vec<Todo>, ApiError> = async {
            let response = self.client.get(self.todos_url.clone()).send().await?;
            let body: TodosResponse = Self::decode(response).await?;
            Ok(body.todos)
        }
        .await;

        Self::record("fetch_todos", start, &result);
        tracing::debug!(ok = result.is_ok(), "GET todos finished");
        result
    }

    #[tracing::instrument(skip(self, text), fields(url = %self.todos_url))]
    async fn save_todo(&self, text: &str) -> Result<Todo, ApiError> {
        let start = Instant::now();

        let result: Result<Todo, ApiError> = async {
            let response = self
                .client
                .post(self.todos_url.clone())
                .json(&SaveTodoRequest::new(text))
                .send()
                .await?;
            let body: TodoResponse = Self::decode(response).await?;
            Ok(body.todo)
        }
        .await;

        Self::record("save_todo", start, &result);
        tracing::debug!(ok = result.is_ok(), "POST todo finished");
        result
    }
}
