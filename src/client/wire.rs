//! Wire contract for the analysis backend.
//!
//! Request and response shapes for `POST /analyze_tabs`. The response's
//! `tabs` array is positionally aligned with the request's `tabs` array —
//! index, not any key field, is the correspondence mechanism.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One tab as submitted to the backend. Identity fields (tab id, window id)
/// are stripped before serialization; the backend never sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequestItem {
    pub title: String,
    pub url: String,
    pub text: String,
}

/// Request body for `POST /analyze_tabs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub tabs: Vec<AnalysisRequestItem>,
}

/// Three-way triage label controlling which presentation bucket a tab
/// lands in.
///
/// The wire value is an open set: anything other than the three known
/// labels — including a missing field — degrades to `SaveForLater`, the
/// safe bucket. A tab is never routed toward closing on an ambiguous
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Importance {
    ReadNow,
    #[default]
    SaveForLater,
    CloseCandidate,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::ReadNow => "read_now",
            Importance::SaveForLater => "save_for_later",
            Importance::CloseCandidate => "close_candidate",
        }
    }
}

impl From<String> for Importance {
    fn from(value: String) -> Self {
        match value.as_str() {
            "read_now" => Importance::ReadNow,
            "close_candidate" => Importance::CloseCandidate,
            _ => Importance::SaveForLater,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one submitted tab.
///
/// `topic`, `category`, and `word_count` default when absent; only the
/// array position is load-bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ClassificationResult {
    pub fn new(
        topic: impl Into<String>,
        category: impl Into<String>,
        importance: Importance,
    ) -> Self {
        Self {
            topic: topic.into(),
            category: category.into(),
            importance,
            word_count: 0,
            summary: None,
        }
    }

    pub fn with_word_count(mut self, word_count: u32) -> Self {
        self.word_count = word_count;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// One row of the per-category summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u32,
}

/// Response body of `POST /analyze_tabs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub tab_count: u32,
    #[serde(default)]
    pub by_category: Vec<CategoryCount>,
    pub tabs: Vec<ClassificationResult>,
}
