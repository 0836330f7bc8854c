//! Todos demo
//!
//! Drives the to-do state core against a backend:
//!
//! - Loads configuration from the environment (and `.env`)
//! - Starts the in-memory backend over HTTP unless `TODOS_API_BASE_URL` is set
//! - Fetches every record, then submits each argument as a new todo
//! - Toggles, recolors and filters, logging every published snapshot
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin todos -- "Buy milk" "Walk the dog"
//! ```

use anyhow::Context;
use axum::{Router, routing::get};
use std::sync::Arc;
use todo_flux_runtime::metrics::MetricsServer;
use todos::thunks::{fetch_todos, save_new_todo};
use todos::{
    AppEnvironment, AppState, Color, ColorChange, Config, FakeTodoBackend, FilterAction,
    HttpTodoApi, StatusFilter, TodoAction, TodoSelectors, create_store,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todos=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(?config, "Configuration loaded");

    let mut metrics = MetricsServer::new();
    if config.metrics_enabled {
        metrics.start()?;
    }
    let metrics = Arc::new(metrics);

    let base_url = match &config.api.base_url {
        Some(url) => url.clone(),
        None => start_fake_backend(&config, Arc::clone(&metrics)).await?,
    };

    let api = HttpTodoApi::new(&base_url, config.api.timeout)?;
    tracing::info!(url = %api.todos_url(), "Using backend");

    let store = create_store(AppEnvironment::new(Arc::new(api)));
    let selectors = TodoSelectors::new();

    let mut updates = store.subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = Arc::clone(&updates.borrow_and_update());
            tracing::debug!(
                status = ?state.todos.status,
                todos = state.todos.count(),
                filter = ?state.filters.status,
                "State changed"
            );
        }
    });

    fetch_todos(&store).await.context("Failed to load todos")?;
    render("Loaded", &store.snapshot(), &selectors);

    for text in std::env::args().skip(1) {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        save_new_todo(&store, text)
            .await
            .with_context(|| format!("Failed to save {text:?}"))?;
    }

    let ids = selectors.todo_ids(&store.snapshot());
    if let Some(&first) = ids.first() {
        store.send(TodoAction::TodoToggled(first).into()).await;
    }
    if let Some(&last) = ids.last() {
        store
            .send(
                TodoAction::ColorSelected {
                    todo_id: last,
                    color: Some(Color::Red),
                }
                .into(),
            )
            .await;
    }
    render("Everything", &store.snapshot(), &selectors);

    store
        .send(FilterAction::StatusFilterChanged(StatusFilter::Active).into())
        .await;
    render("Active", &store.snapshot(), &selectors);

    store
        .send(
            FilterAction::ColorFilterChanged {
                color: Color::Red,
                change: ColorChange::Added,
            }
            .into(),
        )
        .await;
    render("Active and red", &store.snapshot(), &selectors);

    if let Some(body) = metrics.render() {
        tracing::debug!("Metrics:\n{body}");
    }

    // Closing the store ends the watcher's subscription
    drop(store);
    let _ = watcher.await;
    Ok(())
}

/// Serve the in-memory backend (and `/metrics` when enabled) on the
/// configured address and return its base URL
async fn start_fake_backend(config: &Config, metrics: Arc<MetricsServer>) -> anyhow::Result<String> {
    let backend = FakeTodoBackend::seeded().with_latency(config.fake_api.latency);

    let mut app: Router = backend.router();
    if metrics.handle().is_some() {
        app = app.route(
            "/metrics",
            get(move || {
                let metrics = Arc::clone(&metrics);
                async move { metrics.render().unwrap_or_default() }
            }),
        );
    }

    let listener = tokio::net::TcpListener::bind(config.fake_api.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.fake_api.addr))?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Fake backend stopped");
        }
    });

    tracing::info!(%addr, "Fake backend listening");
    Ok(format!("http://{addr}"))
}

fn render(title: &str, state: &AppState, selectors: &TodoSelectors) {
    let visible = selectors.filtered_todos(state);

    println!(
        "\n== {title} ({} of {}, {} left) ==",
        visible.len(),
        state.todos.count(),
        state.todos.remaining_count()
    );
    for todo in &*visible {
        let mark = if todo.completed { 'x' } else { ' ' };
        let color = todo.color.map_or(String::new(), |c| format!(" [{c}]"));
        println!("[{mark}] {:>3} {}{color}", todo.id.get(), todo.text);
    }
}
