//! The tab analysis pipeline.
//!
//! Data flows collector → requester → reconciler → partitioner; each stage
//! is pure with respect to its input apart from the fetcher's interaction
//! with live tabs. Per-tab failures are absorbed by the fetcher; batch
//! failures abort the run and surface as a single error.

pub mod collector;
pub mod fetcher;
pub mod partition;
pub mod reconcile;
pub mod sequence;

pub use collector::{collect, TabRecord};
pub use fetcher::fetch_tab_text;
pub use partition::{partition, Buckets, BUCKET_ORDER};
pub use reconcile::{reconcile, ReconciledTab};
pub use sequence::{RunSequencer, RunTicket};

use crate::client::wire::CategoryCount;
use crate::client::{AnalysisClient, ClientError};
use crate::config::PipelineConfig;
use crate::host::{HostError, TabHost};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Tab enumeration failed before collection could start.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// The batched analysis request could not complete.
    #[error("transport error: {0}")]
    Transport(#[from] ClientError),

    /// The response array does not line up with the submitted batch.
    #[error("protocol mismatch: submitted {expected} tabs, backend returned {actual} results")]
    ProtocolMismatch { expected: usize, actual: usize },

    /// A newer refresh superseded this run; its result was discarded.
    #[error("run superseded by a newer refresh")]
    Superseded,
}

/// Observable phase of a pipeline run.
///
/// `Partitioned` and `ErrorPresented` are resting states; the next trigger
/// clears them. No phase is ever retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Collecting,
    Requesting,
    Reconciling,
    Partitioned,
    ErrorPresented,
}

/// Everything the presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct TabReport {
    /// Total tabs as reported by the backend
    pub tab_count: u32,
    /// Per-category counts for the summary header
    pub by_category: Vec<CategoryCount>,
    /// The three presentation buckets
    pub buckets: Buckets,
}

impl TabReport {
    /// Report for a run with no open tabs.
    pub fn empty() -> Self {
        Self {
            tab_count: 0,
            by_category: Vec::new(),
            buckets: Buckets::default(),
        }
    }
}

/// Drives one collection → analysis → reconciliation → partition pass.
///
/// Every run starts fresh from `Idle`. Overlapping runs are not cancelled;
/// the sequencer fences presentation so a superseded run's result is
/// discarded rather than shown over a newer one.
pub struct TabPipeline {
    host: Arc<dyn TabHost>,
    client: Arc<dyn AnalysisClient>,
    config: PipelineConfig,
    sequencer: RunSequencer,
    phase: Mutex<RunPhase>,
}

impl TabPipeline {
    pub fn new(
        host: Arc<dyn TabHost>,
        client: Arc<dyn AnalysisClient>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            host,
            client,
            config,
            sequencer: RunSequencer::new(),
            phase: Mutex::new(RunPhase::Idle),
        }
    }

    /// Phase of the most recent run.
    pub fn phase(&self) -> RunPhase {
        *self.phase.lock().unwrap()
    }

    fn set_phase(&self, phase: RunPhase) {
        *self.phase.lock().unwrap() = phase;
        debug!(?phase, "Pipeline phase");
    }

    /// Run the full pipeline once.
    ///
    /// A transport or protocol failure aborts the run with a single error
    /// and no partial result set. A run superseded mid-flight by a newer
    /// one returns `Superseded` instead of its (stale) report.
    pub async fn run(&self) -> Result<TabReport, PipelineError> {
        let ticket = self.sequencer.begin();
        match self.run_inner().await {
            Ok(report) => {
                if !ticket.is_current() {
                    warn!("Discarding result of superseded run");
                    return Err(PipelineError::Superseded);
                }
                self.set_phase(RunPhase::Partitioned);
                Ok(report)
            }
            Err(e) => {
                if ticket.is_current() {
                    self.set_phase(RunPhase::ErrorPresented);
                }
                Err(e)
            }
        }
    }

    async fn run_inner(&self) -> Result<TabReport, PipelineError> {
        self.set_phase(RunPhase::Collecting);
        let tabs = self.host.query_tabs().await?;
        if tabs.is_empty() {
            debug!("No open tabs; skipping backend call");
            return Ok(TabReport::empty());
        }
        let records = collect(self.host.as_ref(), tabs, self.config.fetch_timeout).await;

        self.set_phase(RunPhase::Requesting);
        let items: Vec<_> = records.iter().map(TabRecord::request_item).collect();
        let response = self.client.analyze(&items).await?;

        self.set_phase(RunPhase::Reconciling);
        let tab_count = response.tab_count;
        let by_category = response.by_category.clone();
        let reconciled = reconcile(records, response)?;

        let buckets = partition(reconciled);
        Ok(TabReport {
            tab_count,
            by_category,
            buckets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::wire::{ClassificationResult, Importance};
    use crate::client::{mock_response, MockAnalysisClient};
    use crate::host::{MockTabHost, TabHandle};

    fn handle(id: u64) -> TabHandle {
        TabHandle::new(id, 1, format!("Tab {}", id), format!("https://t{}.example", id))
    }

    fn pipeline(host: MockTabHost, client: MockAnalysisClient) -> TabPipeline {
        TabPipeline::new(Arc::new(host), Arc::new(client), PipelineConfig::default())
    }

    #[tokio::test]
    async fn run_produces_partitioned_report() {
        let host = MockTabHost::new(vec![handle(1)]).with_text(1, "body");
        let client = MockAnalysisClient::respond(mock_response(vec![
            ClassificationResult::new("Rust", "dev", Importance::ReadNow),
        ]));
        let p = pipeline(host, client);

        assert_eq!(p.phase(), RunPhase::Idle);
        let report = p.run().await.unwrap();
        assert_eq!(report.tab_count, 1);
        assert_eq!(report.buckets.read_now.len(), 1);
        assert_eq!(p.phase(), RunPhase::Partitioned);
    }

    #[tokio::test]
    async fn empty_tab_set_skips_the_backend() {
        let host = MockTabHost::new(vec![]);
        let client = Arc::new(MockAnalysisClient::respond(mock_response(vec![])));
        let p = TabPipeline::new(
            Arc::new(host),
            client.clone(),
            PipelineConfig::default(),
        );

        let report = p.run().await.unwrap();
        assert_eq!(report, TabReport::empty());
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_ends_in_error_presented() {
        let host = MockTabHost::new(vec![handle(1)]);
        let p = pipeline(host, MockAnalysisClient::unreachable());

        let err = p.run().await.unwrap_err();
        assert!(matches!(err, PipelineError::Transport(_)));
        assert_eq!(p.phase(), RunPhase::ErrorPresented);
    }

    #[tokio::test]
    async fn length_mismatch_ends_in_error_presented() {
        let host = MockTabHost::new(vec![handle(1), handle(2)]);
        let client = MockAnalysisClient::respond(mock_response(vec![
            ClassificationResult::new("Only", "dev", Importance::ReadNow),
        ]));
        let p = pipeline(host, client);

        let err = p.run().await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ProtocolMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(p.phase(), RunPhase::ErrorPresented);
    }
}
