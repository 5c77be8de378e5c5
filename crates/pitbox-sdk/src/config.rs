//! Client configuration.
//!
//! [`ClientConfig`] names the backend and bounds the health probe.  It is
//! built from environment variables at startup; command-line flags may
//! override individual fields afterwards.

use std::time::Duration;

/// Base URL of the assistant backend when `PITBOX_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8765";

/// Health probe bound when `PITBOX_HEALTH_TIMEOUT_SECS` is unset.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings shared by the HTTP client, the monitor and the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the assistant backend, without trailing slash.
    pub base_url: String,
    /// Upper bound on the single `GET /health` probe.
    pub health_timeout: Duration,
}

impl ClientConfig {
    /// Configuration for `base_url` with the default probe timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    /// Replace the health probe timeout.
    #[must_use]
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Build the configuration from environment variables.
    ///
    /// | Variable                     | Default                 | Description              |
    /// |------------------------------|-------------------------|--------------------------|
    /// | `PITBOX_API_URL`             | `http://localhost:8765` | backend base URL         |
    /// | `PITBOX_HEALTH_TIMEOUT_SECS` | `5`                     | health probe bound (s)   |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PITBOX_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let health_timeout = std::env::var("PITBOX_HEALTH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map_or(DEFAULT_HEALTH_TIMEOUT, Duration::from_secs);

        Self::new(base_url).with_health_timeout(health_timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
