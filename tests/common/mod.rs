//! Shared builders for pipeline integration tests.

use tably::{ClassificationResult, Importance, TabHandle};

pub fn handle(id: u64, title: &str, url: &str) -> TabHandle {
    TabHandle::new(id, 1, title, url)
}

pub fn classified(topic: &str, importance: Importance) -> ClassificationResult {
    ClassificationResult::new(topic, "other", importance)
}
