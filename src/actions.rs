//! Post-run tab actions.
//!
//! Focus and close act on the handle captured at collection time, which
//! may be stale by the time the user clicks. A failed action is logged
//! and swallowed so a vanished tab never looks like a pipeline failure.

use crate::host::{TabHandle, TabHost};
use tracing::warn;

/// Bring the tab's window to the foreground and activate the tab.
pub async fn focus_tab(host: &dyn TabHost, tab: &TabHandle) {
    if let Err(e) = host.focus_tab(tab).await {
        warn!(tab = %tab.id, error = %e, "Focus action failed");
    }
}

/// Close the tab.
pub async fn close_tab(host: &dyn TabHost, tab: &TabHandle) {
    if let Err(e) = host.close_tab(tab).await {
        warn!(tab = %tab.id, error = %e, "Close action failed");
    }
}
