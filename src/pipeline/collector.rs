//! Batch collector — fan-out/fan-in over open tabs.

use super::fetcher::fetch_tab_text;
use crate::client::wire::AnalysisRequestItem;
use crate::host::{TabHandle, TabHost};
use futures::future::join_all;
use std::time::Duration;
use tracing::debug;

/// A tab plus the text captured from it during one collection pass.
/// Immutable after creation; discarded at the end of the pass except for
/// the handle fields later user actions need.
#[derive(Debug, Clone, PartialEq)]
pub struct TabRecord {
    pub handle: TabHandle,
    pub text: String,
}

impl TabRecord {
    /// The wire item for this record, with identity fields stripped.
    pub fn request_item(&self) -> AnalysisRequestItem {
        AnalysisRequestItem {
            title: self.handle.title.clone(),
            url: self.handle.url.clone(),
            text: self.text.clone(),
        }
    }
}

/// Fetch text from every tab concurrently.
///
/// The output has exactly the input's length and order: the join is keyed
/// by position, never by completion order, because downstream
/// reconciliation pairs by index. Failed fetches contribute empty text.
pub async fn collect(
    host: &dyn TabHost,
    tabs: Vec<TabHandle>,
    fetch_timeout: Duration,
) -> Vec<TabRecord> {
    let fetches = tabs.iter().map(|tab| fetch_tab_text(host, tab, fetch_timeout));
    let texts = join_all(fetches).await;
    debug!(tabs = tabs.len(), "Collected tab texts");
    tabs.into_iter()
        .zip(texts)
        .map(|(handle, text)| TabRecord { handle, text })
        .collect()
}
