//! Scripted host for tests — preconfigured responses per tab.

use super::{HostError, PageTextResponse, TabHandle, TabHost, TabId};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// How a scripted tab answers a page-text request.
#[derive(Debug, Clone)]
enum TextScript {
    /// Reply with this text, optionally after a delay.
    Reply { text: String, delay: Option<Duration> },
    /// Fail with a messaging error.
    Fail,
    /// Never answer; the fetcher's timeout path fires.
    Hang,
}

/// Scripted `TabHost` for tests.
///
/// Responses are registered per tab id with `with_*` builders. Unscripted
/// tabs reply with empty text. Per-tab delays let tests scramble completion
/// order to exercise the positional join. Focus/close calls are recorded;
/// stale tabs reject them with `NoSuchTab`.
pub struct MockTabHost {
    tabs: Vec<TabHandle>,
    scripts: HashMap<TabId, TextScript>,
    stale: HashSet<TabId>,
    focused: Mutex<Vec<TabId>>,
    closed: Mutex<Vec<TabId>>,
}

impl MockTabHost {
    /// Create a host reporting the given open tabs.
    pub fn new(tabs: Vec<TabHandle>) -> Self {
        Self {
            tabs,
            scripts: HashMap::new(),
            stale: HashSet::new(),
            focused: Mutex::new(Vec::new()),
            closed: Mutex::new(Vec::new()),
        }
    }

    /// Script a tab to reply with the given text.
    pub fn with_text(mut self, id: u64, text: impl Into<String>) -> Self {
        self.scripts.insert(
            TabId(id),
            TextScript::Reply {
                text: text.into(),
                delay: None,
            },
        );
        self
    }

    /// Script a tab to reply with the given text after a delay.
    pub fn with_delayed_text(
        mut self,
        id: u64,
        text: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.scripts.insert(
            TabId(id),
            TextScript::Reply {
                text: text.into(),
                delay: Some(delay),
            },
        );
        self
    }

    /// Script a tab's content context to fail with a messaging error.
    pub fn with_messaging_failure(mut self, id: u64) -> Self {
        self.scripts.insert(TabId(id), TextScript::Fail);
        self
    }

    /// Script a tab to never answer, so the fetch times out.
    pub fn with_no_response(mut self, id: u64) -> Self {
        self.scripts.insert(TabId(id), TextScript::Hang);
        self
    }

    /// Mark a tab as gone; focus/close actions on it fail with `NoSuchTab`.
    pub fn with_stale(mut self, id: u64) -> Self {
        self.stale.insert(TabId(id));
        self
    }

    /// Tab ids that received a focus action, in call order.
    pub fn focused_tabs(&self) -> Vec<TabId> {
        self.focused.lock().unwrap().clone()
    }

    /// Tab ids that received a close action, in call order.
    pub fn closed_tabs(&self) -> Vec<TabId> {
        self.closed.lock().unwrap().clone()
    }
}

#[async_trait]
impl TabHost for MockTabHost {
    async fn query_tabs(&self) -> Result<Vec<TabHandle>, HostError> {
        Ok(self.tabs.clone())
    }

    async fn page_text(&self, tab: &TabHandle) -> Result<PageTextResponse, HostError> {
        match self.scripts.get(&tab.id) {
            Some(TextScript::Reply { text, delay }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(*delay).await;
                }
                Ok(PageTextResponse { text: text.clone() })
            }
            Some(TextScript::Fail) => Err(HostError::Messaging(format!(
                "scripted failure for tab {}",
                tab.id
            ))),
            Some(TextScript::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(PageTextResponse::default())
            }
            None => Ok(PageTextResponse::default()),
        }
    }

    async fn focus_tab(&self, tab: &TabHandle) -> Result<(), HostError> {
        if self.stale.contains(&tab.id) {
            return Err(HostError::NoSuchTab(tab.id));
        }
        self.focused.lock().unwrap().push(tab.id);
        Ok(())
    }

    async fn close_tab(&self, tab: &TabHandle) -> Result<(), HostError> {
        if self.stale.contains(&tab.id) {
            return Err(HostError::NoSuchTab(tab.id));
        }
        self.closed.lock().unwrap().push(tab.id);
        Ok(())
    }
}
