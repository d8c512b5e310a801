//! Run sequencing — stale-run detection for overlapping refreshes.
//!
//! A new user-triggered run does not cancel an in-flight one. The sequencer
//! stamps each run with the current epoch; a run whose ticket is no longer
//! current discards its result instead of presenting it over a newer run's
//! output.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues run tickets. Each `begin` supersedes all earlier tickets.
#[derive(Debug, Default)]
pub struct RunSequencer {
    epoch: Arc<AtomicU64>,
}

/// Ticket held by one run, checked before presenting results.
#[derive(Debug, Clone)]
pub struct RunTicket {
    epoch: Arc<AtomicU64>,
    issued: u64,
}

impl RunSequencer {
    pub fn new() -> Self {
        Self {
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a new run, superseding any ticket issued earlier.
    pub fn begin(&self) -> RunTicket {
        let issued = self.epoch.fetch_add(1, Ordering::Relaxed) + 1;
        RunTicket {
            epoch: Arc::clone(&self.epoch),
            issued,
        }
    }
}

impl RunTicket {
    /// Whether this ticket still belongs to the newest run.
    pub fn is_current(&self) -> bool {
        self.epoch.load(Ordering::Relaxed) == self.issued
    }
}
