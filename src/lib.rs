//! Tably: browser tab triage pipeline
//!
//! Collects text from open browser tabs through a narrow host capability
//! layer, submits the batch to a remote analysis backend, reconciles the
//! positionally aligned response onto the originating tabs, and partitions
//! the results into three presentation buckets.
//!
//! # Core Concepts
//!
//! - **Host**: the capability interface to the browser (`TabHost`) — query
//!   tabs, fetch page text, focus/close a tab
//! - **Pipeline**: collector → requester → reconciler → partitioner, with
//!   per-tab failure absorption and strict positional correspondence
//! - **Buckets**: the three-way triage (`read_now`, `save_for_later`,
//!   `close_candidate`) the presentation layer renders
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tably::{
//!     mock_response, ClassificationResult, Importance, MockAnalysisClient, MockTabHost,
//!     PipelineConfig, TabHandle, TabPipeline,
//! };
//!
//! # async fn demo() -> Result<(), tably::PipelineError> {
//! let tabs = vec![TabHandle::new(1, 1, "Rust book", "https://doc.rust-lang.org/book/")];
//! let host = MockTabHost::new(tabs).with_text(1, "Welcome to the Rust book");
//! let client = MockAnalysisClient::respond(mock_response(vec![
//!     ClassificationResult::new("Rust", "dev", Importance::ReadNow),
//! ]));
//!
//! let pipeline = TabPipeline::new(Arc::new(host), Arc::new(client), PipelineConfig::default());
//! let report = pipeline.run().await?;
//! assert_eq!(report.buckets.read_now.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod host;
pub mod pipeline;

pub use client::wire::{
    AnalysisRequestItem, AnalysisResponse, AnalyzeRequest, CategoryCount, ClassificationResult,
    Importance,
};
pub use client::{mock_response, AnalysisClient, ClientError, HttpAnalysisClient, MockAnalysisClient};
pub use config::PipelineConfig;
pub use host::{
    HostError, MockTabHost, SnapshotHost, SnapshotTab, TabHandle, TabHost, TabId, WindowId,
};
pub use pipeline::{
    Buckets, PipelineError, ReconciledTab, RunPhase, TabPipeline, TabRecord, TabReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
