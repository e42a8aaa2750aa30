//! User Configuration Snapshot
//!
//! `ClearOptions` is the immutable per-run snapshot of the user configuration
//! relevant to one clear operation. It is read once from the injected option
//! store at the start of a run and never mutated; wire names and values match
//! the host's stored option keys.

use crate::retention::RetentionPeriod;
use serde::{Deserialize, Serialize};

/// Which open tabs to remove before/around a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClosePolicy {
    /// No tabs are closed. Stored as `"false"` by the host configuration.
    #[serde(rename = "false", alias = "none")]
    None,
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "allButActive")]
    AllButActive,
    #[serde(rename = "all")]
    All,
    /// Close every tab in every window; the session is ending.
    #[serde(rename = "exit")]
    Exit,
}

impl ClosePolicy {
    /// Whether this policy closes tabs in background (non-focused) windows.
    pub fn closes_background_windows(self) -> bool {
        matches!(self, Self::AllButActive | Self::All | Self::Exit)
    }
}

/// Which tabs to force-reload after a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadPolicy {
    #[serde(rename = "false", alias = "none")]
    None,
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "allButActive")]
    AllButActive,
    #[serde(rename = "all")]
    All,
}

/// Behavior of the combined clear button when several data types are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearAllAction {
    /// The action button clears all enabled data types in one run.
    Main,
    /// The action button opens the popup; "all data types" is a popup entry.
    Sub,
}

/// Immutable snapshot of the user configuration for one clear operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearOptions {
    /// Retention-age selector resolved into the since-threshold.
    #[serde(default = "default_clear_since")]
    pub clear_since: RetentionPeriod,

    /// Restrict removal to the hostname of the active tab.
    #[serde(default)]
    pub only_current_tab: bool,

    #[serde(default = "default_close_tabs")]
    pub close_tabs: ClosePolicy,

    /// Pinned tabs lose their closure protection when set.
    #[serde(default)]
    pub close_pinned_tabs: bool,

    #[serde(default = "default_reload_tabs")]
    pub reload_tabs: ReloadPolicy,

    #[serde(default)]
    pub notify_on_success: bool,

    #[serde(default = "default_clear_all_action")]
    pub clear_all_data_types_action: ClearAllAction,
}

fn default_clear_since() -> RetentionPeriod {
    RetentionPeriod::OneHour
}

fn default_close_tabs() -> ClosePolicy {
    ClosePolicy::None
}

fn default_reload_tabs() -> ReloadPolicy {
    ReloadPolicy::None
}

fn default_clear_all_action() -> ClearAllAction {
    ClearAllAction::Main
}

impl Default for ClearOptions {
    fn default() -> Self {
        Self {
            clear_since: default_clear_since(),
            only_current_tab: false,
            close_tabs: default_close_tabs(),
            close_pinned_tabs: false,
            reload_tabs: default_reload_tabs(),
            notify_on_success: false,
            clear_all_data_types_action: default_clear_all_action(),
        }
    }
}
