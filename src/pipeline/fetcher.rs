//! Per-tab text fetcher.
//!
//! One unreachable or slow tab must never abort a run, so every failure
//! path collapses to an empty string here and nothing propagates.

use crate::host::{TabHandle, TabHost};
use std::time::Duration;
use tracing::debug;

/// Ask `tab`'s content context for its visible text.
///
/// Never fails: a host error, a missing response, or a timeout all yield
/// the empty string. Text is passed through unchanged; length capping is
/// the content side's job.
pub async fn fetch_tab_text(host: &dyn TabHost, tab: &TabHandle, timeout: Duration) -> String {
    match tokio::time::timeout(timeout, host.page_text(tab)).await {
        Ok(Ok(response)) => {
            debug!(tab = %tab.id, len = response.text.len(), "Got page text");
            response.text
        }
        Ok(Err(e)) => {
            debug!(tab = %tab.id, url = %tab.url, error = %e, "No page text for tab");
            String::new()
        }
        Err(_) => {
            debug!(tab = %tab.id, url = %tab.url, "Page text request timed out");
            String::new()
        }
    }
}
