//! Tab Lifecycle Policy
//!
//! Pure decision logic for the close step of a clear operation: given the
//! close-policy option and one tab census, computes which tabs to remove,
//! whether a placeholder tab must be created first to keep the window alive,
//! and whether that placeholder loads a blank page.
//!
//! Rules:
//! - Pinned tabs are protected from closure unless the close-pinned flag is
//!   set or the policy is `exit`.
//! - Background (non-focused) windows are closed for `all`, `allButActive`
//!   and `exit`, honoring the same pinned exception.
//! - No placeholder is ever created on a platform that cannot host
//!   background tabs; the operation proceeds even if it risks closing the
//!   window.

use crate::census::TabCensus;
use crate::host::TabId;
use crate::options::ClosePolicy;

/// A placeholder tab to create before closing, keeping the window alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempTabSpec {
    /// `exit` opens an explicit blank page; the other policies use the
    /// host's default new-tab page.
    pub blank_page: bool,
}

/// Computed close step for one orchestrator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosePlan {
    /// Tabs in background windows, removed as one batch before the focused
    /// window is touched.
    pub background_tab_ids: Vec<TabId>,
    /// Tabs in the focused window, removed as one batch after the
    /// placeholder (if any) exists.
    pub focused_tab_ids: Vec<TabId>,
    pub temp_tab: Option<TempTabSpec>,
}

impl ClosePlan {
    pub fn is_noop(&self) -> bool {
        self.background_tab_ids.is_empty()
            && self.focused_tab_ids.is_empty()
            && self.temp_tab.is_none()
    }
}

/// Compute the close step for `policy` over one consistent census.
///
/// `active_tab_id` is the id captured at census time; it stays authoritative
/// for the whole run even if tabs change concurrently.
pub fn plan_close(
    policy: ClosePolicy,
    close_pinned: bool,
    census: &TabCensus,
    active_tab_id: TabId,
    allows_background_tabs: bool,
) -> ClosePlan {
    if policy == ClosePolicy::None {
        return ClosePlan::default();
    }

    let mut plan = ClosePlan::default();

    if policy.closes_background_windows() {
        plan.background_tab_ids = census
            .background
            .iter()
            .filter(|tab| !tab.pinned || close_pinned || policy == ClosePolicy::Exit)
            .map(|tab| tab.id)
            .collect();
    }

    // Ids of focused-window tabs protected by the pinned rule. Under `exit`
    // the protection list still gates nothing: every focused tab closes.
    let protected_pinned: Vec<TabId> = if !close_pinned || policy == ClosePolicy::Exit {
        census
            .focused
            .iter()
            .filter(|tab| tab.pinned)
            .map(|tab| tab.id)
            .collect()
    } else {
        Vec::new()
    };

    match policy {
        ClosePolicy::None => unreachable!("handled above"),
        ClosePolicy::All => {
            if protected_pinned.is_empty() && allows_background_tabs {
                plan.temp_tab = Some(TempTabSpec { blank_page: false });
            }
            plan.focused_tab_ids = census
                .focused
                .iter()
                .filter(|tab| !protected_pinned.contains(&tab.id))
                .map(|tab| tab.id)
                .collect();
        }
        ClosePolicy::Active => {
            // The active tab may have gone away since the id was captured;
            // a plan never closes a tab the census does not contain.
            let active_present = census.focused.iter().any(|tab| tab.id == active_tab_id);
            if !active_present {
                return plan;
            }
            if protected_pinned.is_empty() && census.focused.len() == 1 && allows_background_tabs
            {
                plan.temp_tab = Some(TempTabSpec { blank_page: false });
            }
            if !protected_pinned.contains(&active_tab_id) {
                plan.focused_tab_ids = vec![active_tab_id];
            }
        }
        ClosePolicy::AllButActive => {
            plan.focused_tab_ids = census
                .focused
                .iter()
                .filter(|tab| !protected_pinned.contains(&tab.id) && tab.id != active_tab_id)
                .map(|tab| tab.id)
                .collect();
        }
        ClosePolicy::Exit => {
            if allows_background_tabs {
                plan.temp_tab = Some(TempTabSpec { blank_page: true });
            }
            plan.focused_tab_ids = census.focused.iter().map(|tab| tab.id).collect();
        }
    }

    plan
}
