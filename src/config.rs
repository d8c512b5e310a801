//! Pipeline configuration.

use std::time::Duration;

/// Default base URL of the analysis backend (local development server).
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default timeout for the whole-batch analysis request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for a single tab's text fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Settings for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL of the analysis backend
    pub backend_url: String,
    /// Timeout for the batched analysis request
    pub request_timeout: Duration,
    /// Timeout for each per-tab text fetch
    pub fetch_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Set the whole-batch request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the per-tab fetch timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
