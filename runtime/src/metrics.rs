//! Prometheus metrics for observability and monitoring.
//!
//! This module provides metric collection for the runtime and its clients:
//! - Store transitions and reducer timing
//! - Snapshot subscribers
//! - Backend API requests
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_flux_runtime::metrics::MetricsServer;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut server = MetricsServer::new();
//! server.start()?;
//!
//! // Render for a `/metrics` endpoint
//! let body = server.render().unwrap_or_default();
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus metrics recorder.
///
/// Installs the global recorder and renders the exposition text; serving it
/// over HTTP is left to the caller.
#[derive(Default)]
pub struct MetricsServer {
    handle: Option<PrometheusHandle>,
}

impl MetricsServer {
    /// Create a recorder that has not been installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Register metric descriptions and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g., in tests), this logs a
    /// warning and succeeds without a handle.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        register_metrics();

        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_01, 0.000_1, 0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!("Metrics recorder installed");
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if the recorder hasn't been installed by this server.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    // Store Metrics
    describe_counter!(
        "store_actions_processed_total",
        "Total number of actions applied by stores"
    );
    describe_histogram!(
        "store_reducer_duration_seconds",
        "Time taken to run the reducer for one action"
    );
    describe_gauge!(
        "store_subscribers",
        "Number of snapshot subscribers at the time of the last subscription"
    );

    // API Client Metrics
    describe_counter!(
        "api_requests_total",
        "Total number of backend API requests"
    );
    describe_counter!(
        "api_request_errors_total",
        "Total number of backend API requests that failed"
    );
    describe_histogram!(
        "api_request_duration_seconds",
        "Time taken by backend API requests"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record an action applied by a store.
    pub fn record_action(duration: Duration) {
        counter!("store_actions_processed_total").increment(1);
        histogram!("store_reducer_duration_seconds").record(duration.as_secs_f64());
    }

    /// Record the current number of subscribers.
    // Note: Precision loss acceptable for a subscriber gauge
    #[allow(clippy::cast_precision_loss)]
    pub fn record_subscribers(count: usize) {
        gauge!("store_subscribers").set(count as f64);
    }
}

/// Backend API metrics recorder.
pub struct ApiMetrics;

impl ApiMetrics {
    /// Record a completed request.
    pub fn record_request(operation: &'static str, duration: Duration) {
        counter!("api_requests_total", "operation" => operation).increment(1);
        histogram!("api_request_duration_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Record a failed request.
    pub fn record_error(operation: &'static str) {
        counter!("api_request_errors_total", "operation" => operation).increment(1);
    }
}
