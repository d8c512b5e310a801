//! Host capability layer — the narrow interface to the browser.
//!
//! All interaction with live tabs goes through the `TabHost` trait so the
//! pipeline can run against a real browser bridge, a snapshot file, or a
//! scripted mock. Tab handles are immutable value objects captured at
//! collection time; a handle may be stale by the time an action runs, and
//! actions must tolerate that.

pub mod mock;
pub mod snapshot;

pub use mock::MockTabHost;
pub use snapshot::{SnapshotError, SnapshotHost, SnapshotTab};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Content contexts cap extracted page text at this many characters.
/// The pipeline passes whatever the host returns through unchanged.
pub const PAGE_TEXT_CAP: usize = 4000;

/// Message type understood by a tab's content context.
pub const GET_PAGE_TEXT: &str = "GET_PAGE_TEXT";

/// Opaque identifier of a tab, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub u64);

impl From<u64> for TabId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the window owning a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl From<u64> for WindowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a browser tab as seen at collection time.
///
/// Owned by the host; the pipeline only reads and forwards it. The tab may
/// be closed or navigated away between collection and a later user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabHandle {
    pub id: TabId,
    pub window_id: WindowId,
    pub title: String,
    pub url: String,
}

impl TabHandle {
    pub fn new(id: u64, window_id: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: TabId(id),
            window_id: WindowId(window_id),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Request dispatched to a tab's content context.
///
/// Serializes to `{"type": "GET_PAGE_TEXT"}` — the exact message a content
/// script listens for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTextRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

impl PageTextRequest {
    pub fn new() -> Self {
        Self {
            kind: GET_PAGE_TEXT.to_string(),
        }
    }
}

impl Default for PageTextRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Reply from a tab's content context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTextResponse {
    #[serde(default)]
    pub text: String,
}

/// Errors surfaced by host operations.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no such tab: {0}")]
    NoSuchTab(TabId),

    #[error("messaging error: {0}")]
    Messaging(String),

    #[error("operation not supported by this host")]
    Unsupported,
}

/// The narrow capability interface to the browser.
///
/// `query_tabs` and `page_text` feed the collection pass; `focus_tab` and
/// `close_tab` serve user actions on the report. Implementations must not
/// assume a handle is still valid when an action arrives.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Enumerate open tabs in the current window.
    async fn query_tabs(&self) -> Result<Vec<TabHandle>, HostError>;

    /// Ask the tab's content context for its visible text.
    async fn page_text(&self, tab: &TabHandle) -> Result<PageTextResponse, HostError>;

    /// Bring the tab's window to the foreground and activate the tab.
    async fn focus_tab(&self, tab: &TabHandle) -> Result<(), HostError>;

    /// Close the tab.
    async fn close_tab(&self, tab: &TabHandle) -> Result<(), HostError>;
}
