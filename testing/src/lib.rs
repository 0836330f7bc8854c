//! # todo-flux Testing
//!
//! Testing utilities and helpers for the todo-flux state architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then builder for reducers
//! - [`SnapshotRecorder`]: Collects snapshots published by a store
//! - [`helpers::init_tracing`]: Test-friendly log output
//!
//! ## Example
//!
//! ```ignore
//! use todo_flux_testing::SnapshotRecorder;
//!
//! #[tokio::test]
//! async fn test_fetch_publishes_loading_then_idle() {
//!     let store = test_store();
//!     let recorder = SnapshotRecorder::start(store.subscribe());
//!
//!     fetch_todos(&store).await?;
//!
//!     recorder.wait_for(2, Duration::from_secs(1)).await?;
//! }
//! ```


/// Snapshot recording for subscription tests
pub mod recorder;

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Honors `RUST_LOG`; safe to call from every test, only the first call
    /// installs anything.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use recorder::SnapshotRecorder;
pub use reducer_test::ReducerTest;
