//! Configuration management for the todos application.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A malformed value is logged and replaced by its default.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend client configuration
    pub api: ApiConfig,
    /// Embedded fake backend configuration
    pub fake_api: FakeApiConfig,
    /// Whether to install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
}

/// Backend client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of a remote backend; `None` starts the embedded fake backend
    pub base_url: Option<String>,
    /// Transport timeout per request; `None` means no timeout
    pub timeout: Option<Duration>,
}

/// Embedded fake backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeApiConfig {
    /// Address to bind to (port 0 picks a free port)
    pub addr: SocketAddr,
    /// Artificial latency added to every response
    pub latency: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("TODOS_API_BASE_URL").filter(|url| !url.trim().is_empty());
        let timeout = parse_var::<u64>(&lookup, "TODOS_HTTP_TIMEOUT_SECS").map(Duration::from_secs);

        let addr = parse_var(&lookup, "TODOS_FAKE_API_ADDR")
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 0)));
        let latency = parse_var(&lookup, "TODOS_FAKE_API_LATENCY_MS")
            .map_or(Duration::ZERO, Duration::from_millis);

        let metrics_enabled = parse_var(&lookup, "TODOS_METRICS_ENABLED").unwrap_or(false);

        Self {
            api: ApiConfig { base_url, timeout },
            fake_api: FakeApiConfig { addr, latency },
            metrics_enabled,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Parse variable `key`; `None` when unset or malformed
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring malformed configuration value");
            None
        }
    }
}
