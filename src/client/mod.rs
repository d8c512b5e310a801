//! Analysis backend client.
//!
//! `AnalysisClient` abstracts over transport (HTTP, mock) so the pipeline
//! doesn't depend on how the backend is reached. The HTTP implementation
//! talks to the backend's two endpoints: `POST /analyze_tabs` and
//! `GET /ping`.

pub mod wire;

use crate::config::PipelineConfig;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use wire::{AnalysisRequestItem, AnalysisResponse, AnalyzeRequest, CategoryCount, ClassificationResult};

const ANALYZE_TABS_PATH: &str = "/analyze_tabs";
const PING_PATH: &str = "/ping";

/// Transport errors from the analysis backend.
///
/// All of these abort the run: a failed batch must surface as a single
/// clear failure, never as a partially populated result set.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("response parse error: {0}")]
    Parse(String),
}

/// Client trait for the analysis backend.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Submit a batch of tabs for classification.
    ///
    /// The returned `tabs` array is positionally aligned with `items`.
    async fn analyze(&self, items: &[AnalysisRequestItem])
        -> Result<AnalysisResponse, ClientError>;

    /// Liveness check. Any JSON-decodable body is success.
    async fn ping(&self) -> Result<serde_json::Value, ClientError>;
}

/// HTTP implementation of `AnalysisClient`.
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Create a client for the configured backend.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(
        &self,
        items: &[AnalysisRequestItem],
    ) -> Result<AnalysisResponse, ClientError> {
        let request = AnalyzeRequest {
            tabs: items.to_vec(),
        };
        debug!(tabs = items.len(), "Submitting analysis batch");

        let response = self
            .http
            .post(self.url(ANALYZE_TABS_PATH))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        response
            .json::<AnalysisResponse>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn ping(&self) -> Result<serde_json::Value, ClientError> {
        let response = self
            .http
            .get(self.url(PING_PATH))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// What a mock client does when called.
#[derive(Debug, Clone)]
enum MockOutcome {
    Respond(AnalysisResponse),
    Unreachable,
    Malformed,
}

/// Mock client for testing — preconfigured outcome, records every batch
/// it receives.
pub struct MockAnalysisClient {
    outcome: MockOutcome,
    delay: Option<Duration>,
    requests: Mutex<Vec<Vec<AnalysisRequestItem>>>,
}

impl MockAnalysisClient {
    /// Create a mock that answers every batch with the given response.
    pub fn respond(response: AnalysisResponse) -> Self {
        Self {
            outcome: MockOutcome::Respond(response),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose requests fail at the network layer.
    pub fn unreachable() -> Self {
        Self {
            outcome: MockOutcome::Unreachable,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose responses fail to parse.
    pub fn malformed() -> Self {
        Self {
            outcome: MockOutcome::Malformed,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Delay every `analyze` call, for tests that overlap runs.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every batch submitted so far, in call order.
    pub fn requests(&self) -> Vec<Vec<AnalysisRequestItem>> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of `analyze` calls so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalysisClient for MockAnalysisClient {
    async fn analyze(
        &self,
        items: &[AnalysisRequestItem],
    ) -> Result<AnalysisResponse, ClientError> {
        self.requests.lock().unwrap().push(items.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            MockOutcome::Respond(response) => Ok(response.clone()),
            MockOutcome::Unreachable => {
                Err(ClientError::Network("mock backend unreachable".to_string()))
            }
            MockOutcome::Malformed => {
                Err(ClientError::Parse("mock malformed response".to_string()))
            }
        }
    }

    async fn ping(&self) -> Result<serde_json::Value, ClientError> {
        match &self.outcome {
            MockOutcome::Unreachable => {
                Err(ClientError::Network("mock backend unreachable".to_string()))
            }
            _ => Ok(serde_json::json!({"status": "ok"})),
        }
    }
}

/// Build a well-formed `AnalysisResponse` from classifications, computing
/// `tab_count` and `by_category` the way the backend does (categories in
/// first-seen order).
pub fn mock_response(tabs: Vec<ClassificationResult>) -> AnalysisResponse {
    let mut by_category: Vec<CategoryCount> = Vec::new();
    for tab in &tabs {
        match by_category.iter_mut().find(|c| c.category == tab.category) {
            Some(entry) => entry.count += 1,
            None => by_category.push(CategoryCount {
                category: tab.category.clone(),
                count: 1,
            }),
        }
    }
    AnalysisResponse {
        tab_count: tabs.len() as u32,
        by_category,
        tabs,
    }
}
