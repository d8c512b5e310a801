//! Snapshot host — drives the pipeline from a JSON file instead of a live
//! browser. Useful for the CLI and for replaying captured tab sets.

use super::{HostError, PageTextResponse, TabHandle, TabHost, PAGE_TEXT_CAP};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// One tab in a snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTab {
    pub id: u64,
    pub window_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub text: String,
}

/// Errors loading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A `TabHost` backed by a static snapshot of tabs.
///
/// Page text comes from the snapshot, truncated at `PAGE_TEXT_CAP` the way
/// a live content context would truncate it. Focus and close have no live
/// browser to act on and report `Unsupported`.
pub struct SnapshotHost {
    tabs: Vec<SnapshotTab>,
}

impl SnapshotHost {
    /// Load a snapshot from a JSON file holding an array of tabs.
    pub fn open(path: &Path) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path)?;
        let tabs: Vec<SnapshotTab> = serde_json::from_str(&raw)?;
        Ok(Self { tabs })
    }

    /// Build a host directly from snapshot records.
    pub fn from_tabs(tabs: Vec<SnapshotTab>) -> Self {
        Self { tabs }
    }
}

#[async_trait]
impl TabHost for SnapshotHost {
    async fn query_tabs(&self) -> Result<Vec<TabHandle>, HostError> {
        Ok(self
            .tabs
            .iter()
            .map(|t| TabHandle::new(t.id, t.window_id, t.title.clone(), t.url.clone()))
            .collect())
    }

    async fn page_text(&self, tab: &TabHandle) -> Result<PageTextResponse, HostError> {
        let snapshot = self
            .tabs
            .iter()
            .find(|t| t.id == tab.id.0)
            .ok_or(HostError::NoSuchTab(tab.id))?;
        let text: String = snapshot.text.chars().take(PAGE_TEXT_CAP).collect();
        Ok(PageTextResponse { text })
    }

    async fn focus_tab(&self, _tab: &TabHandle) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }

    async fn close_tab(&self, _tab: &TabHandle) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn snapshot_tab(id: u64, text: &str) -> SnapshotTab {
        SnapshotTab {
            id,
            window_id: 1,
            title: format!("Tab {}", id),
            url: format!("https://t{}.example", id),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn open_reads_tabs_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "window_id": 2, "title": "Docs", "url": "https://d.example", "text": "body"}}]"#
        )
        .unwrap();

        let host = SnapshotHost::open(file.path()).unwrap();
        let tabs = host.query_tabs().await.unwrap();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].title, "Docs");

        let response = host.page_text(&tabs[0]).await.unwrap();
        assert_eq!(response.text, "body");
    }

    #[tokio::test]
    async fn page_text_is_capped() {
        let long = "x".repeat(PAGE_TEXT_CAP + 100);
        let host = SnapshotHost::from_tabs(vec![snapshot_tab(1, &long)]);
        let tabs = host.query_tabs().await.unwrap();
        let response = host.page_text(&tabs[0]).await.unwrap();
        assert_eq!(response.text.len(), PAGE_TEXT_CAP);
    }

    #[tokio::test]
    async fn unknown_tab_is_no_such_tab() {
        let host = SnapshotHost::from_tabs(vec![snapshot_tab(1, "")]);
        let ghost = TabHandle::new(99, 1, "", "");
        let err = host.page_text(&ghost).await.unwrap_err();
        assert!(matches!(err, HostError::NoSuchTab(_)));
    }

    #[tokio::test]
    async fn actions_are_unsupported() {
        let host = SnapshotHost::from_tabs(vec![snapshot_tab(1, "")]);
        let tabs = host.query_tabs().await.unwrap();
        assert!(matches!(
            host.focus_tab(&tabs[0]).await.unwrap_err(),
            HostError::Unsupported
        ));
        assert!(matches!(
            host.close_tab(&tabs[0]).await.unwrap_err(),
            HostError::Unsupported
        ));
    }

    #[test]
    fn snapshot_tolerates_missing_optional_fields() {
        let tab: SnapshotTab = serde_json::from_str(r#"{"id": 3, "window_id": 1}"#).unwrap();
        assert_eq!(tab.title, "");
        assert_eq!(tab.url, "");
        assert_eq!(tab.text, "");
    }
}
