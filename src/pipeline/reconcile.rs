//! Result reconciler — re-associates response elements with originating
//! tabs by positional index.

use super::collector::TabRecord;
use super::PipelineError;
use crate::client::wire::{AnalysisResponse, ClassificationResult};

/// A tab paired with its classification. Exists only transiently between
/// reconciliation and partitioning.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledTab {
    pub record: TabRecord,
    pub classification: ClassificationResult,
}

/// Pair each collected record with the response element at the same index.
///
/// Lengths must agree exactly: zipping unevenly would misattribute
/// classifications to the wrong tabs, and later focus/close actions act on
/// the original handles. A mismatch aborts the run as `ProtocolMismatch`.
/// Once lengths agree the pairing is total — unknown importance values
/// were already degraded to the safe bucket at deserialization.
pub fn reconcile(
    records: Vec<TabRecord>,
    response: AnalysisResponse,
) -> Result<Vec<ReconciledTab>, PipelineError> {
    if records.len() != response.tabs.len() {
        return Err(PipelineError::ProtocolMismatch {
            expected: records.len(),
            actual: response.tabs.len(),
        });
    }
    Ok(records
        .into_iter()
        .zip(response.tabs)
        .map(|(record, classification)| ReconciledTab {
            record,
            classification,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock_response;
    use crate::client::wire::Importance;
    use crate::host::TabHandle;

    fn record(id: u64) -> TabRecord {
        TabRecord {
            handle: TabHandle::new(id, 1, format!("Tab {}", id), format!("https://t{}.example", id)),
            text: String::new(),
        }
    }

    fn classified(topic: &str, importance: Importance) -> ClassificationResult {
        ClassificationResult::new(topic, "other", importance)
    }

    #[test]
    fn pairs_records_and_results_by_index() {
        let records = vec![record(1), record(2)];
        let response = mock_response(vec![
            classified("First", Importance::ReadNow),
            classified("Second", Importance::CloseCandidate),
        ]);

        let reconciled = reconcile(records, response).unwrap();
        assert_eq!(reconciled.len(), 2);
        assert_eq!(reconciled[0].record.handle.id.0, 1);
        assert_eq!(reconciled[0].classification.topic, "First");
        assert_eq!(reconciled[1].record.handle.id.0, 2);
        assert_eq!(reconciled[1].classification.topic, "Second");
    }

    #[test]
    fn short_response_is_a_protocol_mismatch() {
        let records = vec![record(1), record(2)];
        let response = mock_response(vec![classified("Only", Importance::ReadNow)]);

        let err = reconcile(records, response).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ProtocolMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn long_response_is_a_protocol_mismatch() {
        let records = vec![record(1)];
        let response = mock_response(vec![
            classified("A", Importance::ReadNow),
            classified("B", Importance::ReadNow),
        ]);

        let err = reconcile(records, response).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ProtocolMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn empty_on_both_sides_is_fine() {
        let reconciled = reconcile(vec![], mock_response(vec![])).unwrap();
        assert!(reconciled.is_empty());
    }
}
