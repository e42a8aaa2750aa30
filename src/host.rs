//! Host Service Abstraction
//!
//! Narrow interfaces over the browser host. The orchestrator, action
//! controller, and message router are written against these traits only, so
//! the sequencing logic is testable with in-process fakes; the real
//! implementations are thin wrappers around the host runtime and live with
//! the embedding, not in this crate.

use crate::data_types::{DataType, DataTypeSet};
use crate::error::HostError;
use crate::options::ClearOptions;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Host tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TabId(pub u32);

/// Per-tab record captured at one point in time. Snapshots are never cached
/// across operations; the census is retaken on every clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSnapshot {
    pub id: TabId,
    pub url: String,
    pub pinned: bool,
    pub active: bool,
}

/// Filter for [`TabService::query`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabQuery {
    /// `Some(true)` restricts to the focused window, `Some(false)` to
    /// background windows, `None` matches every window.
    pub last_focused_window: Option<bool>,
}

impl TabQuery {
    pub fn all_windows() -> Self {
        Self::default()
    }

    pub fn focused_window() -> Self {
        Self {
            last_focused_window: Some(true),
        }
    }

    pub fn background_windows() -> Self {
        Self {
            last_focused_window: Some(false),
        }
    }
}

/// Arguments for [`TabService::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTab {
    pub url: Option<String>,
    pub active: bool,
}

/// The exact argument passed to the host bulk data-removal call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RemovalRequest {
    /// Restrict removal to these hostnames, when the per-tab option is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,
    /// Cutoff instant, milliseconds since the Unix epoch. 0 clears all time.
    pub since: i64,
    #[serde(rename = "dataTypes")]
    pub data_types: DataTypeSet,
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Error,
}

/// A user-visible notification, rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message_id: String,
    pub kind: NotificationKind,
    pub timeout: Option<Duration>,
}

impl Notification {
    pub fn error(message_id: &str) -> Self {
        Self {
            message_id: message_id.to_string(),
            kind: NotificationKind::Error,
            timeout: None,
        }
    }

    pub fn info(message_id: &str, timeout: Option<Duration>) -> Self {
        Self {
            message_id: message_id.to_string(),
            kind: NotificationKind::Info,
            timeout,
        }
    }
}

/// Operating system reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    Linux,
    Android,
    Ios,
}

/// Browser engine the host runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetEnv {
    Firefox,
    Chromium,
    Samsung,
}

/// Platform record; drives the restricted-mobile rule and the engine-specific
/// local-storage removal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: Os,
    pub target: TargetEnv,
}

impl Platform {
    /// Whether a hidden placeholder tab can keep a window alive. The
    /// constrained mobile platform cannot host background tabs, so no temp
    /// tab is ever created there.
    pub fn allows_background_tabs(&self) -> bool {
        self.os != Os::Android
    }
}

/// Read-only access to the persisted user options.
#[async_trait]
pub trait OptionStore: Send + Sync {
    async fn options(&self) -> Result<ClearOptions, HostError>;
}

/// Resolves the ordered list of currently enabled data categories.
#[async_trait]
pub trait EnabledTypesProvider: Send + Sync {
    async fn enabled_data_types(
        &self,
        options: &ClearOptions,
    ) -> Result<Vec<DataType>, HostError>;
}

/// Tab and window manipulation.
#[async_trait]
pub trait TabService: Send + Sync {
    async fn query(&self, filter: TabQuery) -> Result<Vec<TabSnapshot>, HostError>;

    /// The active tab of the focused window.
    async fn active_tab(&self) -> Result<TabSnapshot, HostError>;

    async fn create(&self, params: CreateTab) -> Result<TabId, HostError>;

    /// Batched removal: all enumerated ids are requested in one host call.
    async fn remove(&self, tab_ids: &[TabId]) -> Result<(), HostError>;

    async fn reload(&self, tab_id: TabId, bypass_cache: bool) -> Result<(), HostError>;
}

/// The host browsing-data removal API.
#[async_trait]
pub trait DataRemovalService: Send + Sync {
    async fn remove(&self, request: &RemovalRequest) -> Result<(), HostError>;

    /// Dedicated whole-store local-storage removal. Used on engines whose
    /// bulk call cannot honor a since-threshold for local storage.
    async fn remove_local_storage(&self) -> Result<(), HostError>;
}

/// User notification rendering.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn show(&self, notification: Notification) -> Result<(), HostError>;
}

/// Platform detection.
#[async_trait]
pub trait PlatformService: Send + Sync {
    async fn platform(&self) -> Result<Platform, HostError>;
}

/// The visible browser-action element (toolbar button).
#[async_trait]
pub trait BrowserAction: Send + Sync {
    async fn set_title(&self, title: &str) -> Result<(), HostError>;

    /// `None` clears the popup so the button click fires directly.
    async fn set_popup(&self, popup: Option<&str>) -> Result<(), HostError>;
}

/// Localized text lookup. In-process and infallible on the host side.
pub trait LocaleService: Send + Sync {
    fn text(&self, message_id: &str) -> String;
}
