//! Shared test utilities for integration tests
//!
//! A recording in-process fake of the host: one `MockHost` implements every
//! collaborator trait, maintains a mutable tab set split into focused and
//! background windows, and records every call the core makes so tests can
//! assert the exact sequence of side effects.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use tabclear::data_types::DataType;
use tabclear::error::HostError;
use tabclear::host::{
    BrowserAction, CreateTab, DataRemovalService, EnabledTypesProvider, LocaleService,
    Notification, NotificationService, OptionStore, Os, Platform, PlatformService,
    RemovalRequest, TabId, TabQuery, TabService, TabSnapshot, TargetEnv,
};
use tabclear::options::ClearOptions;
use tabclear::orchestrator::{ClearOrchestrator, HostServices};

/// One open tab with its window placement.
#[derive(Debug, Clone)]
pub struct MockTab {
    pub snapshot: TabSnapshot,
    pub focused_window: bool,
}

#[derive(Default)]
pub struct MockHost {
    pub options: Mutex<ClearOptions>,
    pub enabled: Mutex<Vec<DataType>>,
    pub platform: Mutex<Option<Platform>>,

    pub tabs: Mutex<Vec<MockTab>>,
    next_tab_id: AtomicU32,

    // recorded calls
    pub removed_batches: Mutex<Vec<Vec<TabId>>>,
    pub created: Mutex<Vec<CreateTab>>,
    pub reloads: Mutex<Vec<(TabId, bool)>>,
    pub removal_requests: Mutex<Vec<RemovalRequest>>,
    pub local_storage_removals: AtomicUsize,
    pub notifications: Mutex<Vec<Notification>>,
    pub titles: Mutex<Vec<String>>,
    pub popups: Mutex<Vec<Option<String>>>,

    // failure injection
    pub fail_removal: AtomicBool,
    pub fail_local_storage_removal: AtomicBool,
    pub fail_reloads: Mutex<Vec<TabId>>,
}

pub fn desktop() -> Platform {
    Platform {
        os: Os::Linux,
        target: TargetEnv::Firefox,
    }
}

pub fn android() -> Platform {
    Platform {
        os: Os::Android,
        target: TargetEnv::Firefox,
    }
}

pub fn chromium_desktop() -> Platform {
    Platform {
        os: Os::Windows,
        target: TargetEnv::Chromium,
    }
}

/// Focused-window tab helper.
pub fn tab(id: u32, pinned: bool, active: bool) -> MockTab {
    MockTab {
        snapshot: TabSnapshot {
            id: TabId(id),
            url: format!("https://example.com/{}", id),
            pinned,
            active,
        },
        focused_window: true,
    }
}

/// Background-window tab helper.
pub fn background_tab(id: u32, pinned: bool) -> MockTab {
    MockTab {
        focused_window: false,
        ..tab(id, pinned, false)
    }
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        let host = Self {
            platform: Mutex::new(Some(desktop())),
            next_tab_id: AtomicU32::new(100),
            ..Self::default()
        };
        Arc::new(host)
    }

    pub fn install_tabs(&self, tabs: Vec<MockTab>) {
        *self.tabs.lock() = tabs;
    }

    pub fn set_options(&self, options: ClearOptions) {
        *self.options.lock() = options;
    }

    pub fn set_enabled(&self, enabled: Vec<DataType>) {
        *self.enabled.lock() = enabled;
    }

    pub fn set_platform(&self, platform: Platform) {
        *self.platform.lock() = Some(platform);
    }

    /// Ids of the tabs still open, in insertion order.
    pub fn open_tab_ids(&self) -> Vec<TabId> {
        self.tabs.lock().iter().map(|t| t.snapshot.id).collect()
    }

    pub fn notification_ids(&self) -> Vec<String> {
        self.notifications
            .lock()
            .iter()
            .map(|n| n.message_id.clone())
            .collect()
    }
}

pub fn services(host: &Arc<MockHost>) -> HostServices {
    HostServices {
        options: Arc::clone(host) as _,
        enabled_types: Arc::clone(host) as _,
        tabs: Arc::clone(host) as _,
        removal: Arc::clone(host) as _,
        notifications: Arc::clone(host) as _,
        platform: Arc::clone(host) as _,
    }
}

pub fn orchestrator(host: &Arc<MockHost>) -> ClearOrchestrator {
    ClearOrchestrator::new(services(host))
}

#[async_trait]
impl OptionStore for MockHost {
    async fn options(&self) -> Result<ClearOptions, HostError> {
        Ok(self.options.lock().clone())
    }
}

#[async_trait]
impl EnabledTypesProvider for MockHost {
    async fn enabled_data_types(
        &self,
        _options: &ClearOptions,
    ) -> Result<Vec<DataType>, HostError> {
        Ok(self.enabled.lock().clone())
    }
}

#[async_trait]
impl TabService for MockHost {
    async fn query(&self, filter: TabQuery) -> Result<Vec<TabSnapshot>, HostError> {
        Ok(self
            .tabs
            .lock()
            .iter()
            .filter(|t| match filter.last_focused_window {
                Some(focused) => t.focused_window == focused,
                None => true,
            })
            .map(|t| t.snapshot.clone())
            .collect())
    }

    async fn active_tab(&self) -> Result<TabSnapshot, HostError> {
        self.tabs
            .lock()
            .iter()
            .find(|t| t.focused_window && t.snapshot.active)
            .map(|t| t.snapshot.clone())
            .ok_or_else(|| HostError::Rejected("no active tab".to_string()))
    }

    async fn create(&self, params: CreateTab) -> Result<TabId, HostError> {
        let id = TabId(self.next_tab_id.fetch_add(1, Ordering::SeqCst));
        self.created.lock().push(params.clone());
        self.tabs.lock().push(MockTab {
            snapshot: TabSnapshot {
                id,
                url: params.url.unwrap_or_default(),
                pinned: false,
                active: params.active,
            },
            focused_window: true,
        });
        Ok(id)
    }

    async fn remove(&self, tab_ids: &[TabId]) -> Result<(), HostError> {
        self.removed_batches.lock().push(tab_ids.to_vec());
        self.tabs
            .lock()
            .retain(|t| !tab_ids.contains(&t.snapshot.id));
        Ok(())
    }

    async fn reload(&self, tab_id: TabId, bypass_cache: bool) -> Result<(), HostError> {
        if self.fail_reloads.lock().contains(&tab_id) {
            return Err(HostError::Rejected(format!(
                "reload rejected for tab {}",
                tab_id.0
            )));
        }
        if !self.tabs.lock().iter().any(|t| t.snapshot.id == tab_id) {
            return Err(HostError::TabNotFound(tab_id));
        }
        self.reloads.lock().push((tab_id, bypass_cache));
        Ok(())
    }
}

#[async_trait]
impl DataRemovalService for MockHost {
    async fn remove(&self, request: &RemovalRequest) -> Result<(), HostError> {
        if self.fail_removal.load(Ordering::SeqCst) {
            return Err(HostError::Rejected("removal rejected".to_string()));
        }
        self.removal_requests.lock().push(request.clone());
        Ok(())
    }

    async fn remove_local_storage(&self) -> Result<(), HostError> {
        if self.fail_local_storage_removal.load(Ordering::SeqCst) {
            return Err(HostError::Rejected("local storage removal rejected".to_string()));
        }
        self.local_storage_removals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl NotificationService for MockHost {
    async fn show(&self, notification: Notification) -> Result<(), HostError> {
        self.notifications.lock().push(notification);
        Ok(())
    }
}

#[async_trait]
impl PlatformService for MockHost {
    async fn platform(&self) -> Result<Platform, HostError> {
        self.platform
            .lock()
            .ok_or_else(|| HostError::Disconnected("platform unavailable".to_string()))
    }
}

#[async_trait]
impl BrowserAction for MockHost {
    async fn set_title(&self, title: &str) -> Result<(), HostError> {
        self.titles.lock().push(title.to_string());
        Ok(())
    }

    async fn set_popup(&self, popup: Option<&str>) -> Result<(), HostError> {
        self.popups.lock().push(popup.map(str::to_string));
        Ok(())
    }
}

impl LocaleService for MockHost {
    fn text(&self, message_id: &str) -> String {
        message_id.to_string()
    }
}
