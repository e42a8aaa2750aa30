//! Tab Census
//!
//! One consistent snapshot of the open tab set, split into the focused-window
//! and background-window views the close policies operate on. The census is
//! taken once per orchestrator run; the policy computation and the close call
//! both work from this snapshot and never re-derive it mid-operation.

use crate::error::HostError;
use crate::host::{TabQuery, TabService, TabSnapshot};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabCensus {
    /// Tabs in the focused window.
    pub focused: Vec<TabSnapshot>,
    /// Tabs in every non-focused window.
    pub background: Vec<TabSnapshot>,
}

impl TabCensus {
    /// Snapshot the current tab set.
    pub async fn take(tabs: &dyn TabService) -> Result<Self, HostError> {
        let background = tabs.query(TabQuery::background_windows()).await?;
        let focused = tabs.query(TabQuery::focused_window()).await?;
        Ok(Self { focused, background })
    }
}
