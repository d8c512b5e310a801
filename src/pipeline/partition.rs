//! Bucket partitioner — routes reconciled tabs into the three fixed
//! presentation buckets.

use super::reconcile::ReconciledTab;
use crate::client::wire::Importance;

/// Fixed presentation order of the buckets.
pub const BUCKET_ORDER: [Importance; 3] = [
    Importance::ReadNow,
    Importance::SaveForLater,
    Importance::CloseCandidate,
];

/// The three display buckets for one run, each in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    pub read_now: Vec<ReconciledTab>,
    pub save_for_later: Vec<ReconciledTab>,
    pub close_candidate: Vec<ReconciledTab>,
}

impl Buckets {
    /// Total number of tabs across all buckets.
    pub fn len(&self) -> usize {
        self.read_now.len() + self.save_for_later.len() + self.close_candidate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bucket for an importance value.
    pub fn get(&self, importance: Importance) -> &[ReconciledTab] {
        match importance {
            Importance::ReadNow => &self.read_now,
            Importance::SaveForLater => &self.save_for_later,
            Importance::CloseCandidate => &self.close_candidate,
        }
    }

    /// Non-empty buckets in fixed presentation order. Empty buckets are
    /// omitted entirely rather than rendered with empty headers.
    pub fn sections(&self) -> Vec<(Importance, &[ReconciledTab])> {
        BUCKET_ORDER
            .iter()
            .map(|imp| (*imp, self.get(*imp)))
            .filter(|(_, tabs)| !tabs.is_empty())
            .collect()
    }
}

/// Route every reconciled tab to exactly one bucket by importance,
/// preserving relative input order. Single pass, no cross-element
/// interaction.
pub fn partition(reconciled: Vec<ReconciledTab>) -> Buckets {
    let mut buckets = Buckets::default();
    for tab in reconciled {
        match tab.classification.importance {
            Importance::ReadNow => buckets.read_now.push(tab),
            Importance::SaveForLater => buckets.save_for_later.push(tab),
            Importance::CloseCandidate => buckets.close_candidate.push(tab),
        }
    }
    buckets
}
