//! Clear Orchestrator
//!
//! Drives the end-to-end clear sequence: resolve options, compute the
//! since-threshold and data-type set, apply the close policy, invoke data
//! removal, clean up the placeholder tab or apply the reload policy, and
//! notify the user.
//!
//! The run is a strict four-phase sequence (options resolved, tabs closed,
//! data removed, finalized). All tab work is computed from one census taken
//! at the start of the close phase; the active-tab id captured there stays
//! authoritative for the whole run. Tab closures and placeholder creation
//! are best-effort; the removal step (including the reload that flushes the
//! surviving active tab) and the reload fan-out are terminal on failure.

use crate::census::TabCensus;
use crate::data_types::{resolve_data_types, DataType, DataTypeSelection, DataTypeSet};
use crate::error::{ClearError, HostError};
use crate::host::{
    CreateTab, DataRemovalService, EnabledTypesProvider, Notification, NotificationService,
    OptionStore, Platform, PlatformService, RemovalRequest, TabId, TabQuery, TabService,
    TargetEnv,
};
use crate::options::{ClearAllAction, ClearOptions, ClosePolicy, ReloadPolicy};
use crate::policy::plan_close;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Notification shown when the removal call is rejected by the host.
pub const MSG_DATA_NOT_CLEARED: &str = "error_dataTypeNotCleared";
/// Notification shown on success when the option is enabled.
pub const MSG_DATA_CLEARED: &str = "info_dataTypeCleared";
/// Notification shown when a combined clear finds no enabled data types.
pub const MSG_ALL_DATA_TYPES_DISABLED: &str = "error_allDataTypesDisabled";

/// Display time of the success notification.
pub const SUCCESS_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(6);

const BLANK_PAGE_URL: &str = "about:blank";

/// The injected host collaborators one orchestrator works against.
#[derive(Clone)]
pub struct HostServices {
    pub options: Arc<dyn OptionStore>,
    pub enabled_types: Arc<dyn EnabledTypesProvider>,
    pub tabs: Arc<dyn TabService>,
    pub removal: Arc<dyn DataRemovalService>,
    pub notifications: Arc<dyn NotificationService>,
    pub platform: Arc<dyn PlatformService>,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared(ClearReport),
    /// The resolved data-type set was empty; nothing was closed, removed or
    /// reloaded.
    NothingToClear,
}

/// What one run actually did, for callers and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Resolved cutoff instant (ms since epoch; 0 = all time).
    pub since: i64,
    pub closed_tab_ids: Vec<TabId>,
    /// Whether the bulk removal call was issued (false when the engine
    /// special case emptied the set first).
    pub removal_invoked: bool,
    pub reloaded_tab_ids: Vec<TabId>,
    /// Placeholder tab created during the close step, if any. Removed again
    /// under the `exit` policy, left alive otherwise.
    pub temp_tab: Option<TabId>,
}

pub struct ClearOrchestrator {
    services: HostServices,
}

impl ClearOrchestrator {
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Clear the given selection, loading a fresh option snapshot first.
    /// Entry point for popup submissions.
    pub async fn clear(&self, selection: DataTypeSelection) -> Result<ClearOutcome, ClearError> {
        let options = self.services.options.options().await?;
        self.clear_with_options(selection, options).await
    }

    /// Entry point for the action button: picks the selection from the
    /// enabled data types and the combined-clear-button behavior. When every
    /// category is disabled, shows the dedicated notification and performs
    /// nothing.
    pub async fn clear_from_action(&self) -> Result<ClearOutcome, ClearError> {
        let options = self.services.options.options().await?;
        let enabled = self
            .services
            .enabled_types
            .enabled_data_types(&options)
            .await?;

        if enabled.is_empty() {
            info!("All data types disabled, nothing to clear");
            self.notify(Notification::error(MSG_ALL_DATA_TYPES_DISABLED))
                .await;
            return Ok(ClearOutcome::NothingToClear);
        }

        let selection = if options.clear_all_data_types_action == ClearAllAction::Main
            && enabled.len() > 1
        {
            DataTypeSelection::AllEnabled
        } else {
            DataTypeSelection::Single(enabled[0])
        };

        self.clear_with_options(selection, options).await
    }

    /// Run the clear sequence against an already-resolved option snapshot.
    pub async fn clear_with_options(
        &self,
        selection: DataTypeSelection,
        options: ClearOptions,
    ) -> Result<ClearOutcome, ClearError> {
        // Phase 1: resolve options into the run parameters.
        let platform = self.services.platform.platform().await?;
        let active = self.services.tabs.active_tab().await?;
        let active_tab_id = active.id;

        let hostnames = if options.only_current_tab {
            match hostname_of(&active.url) {
                Some(hostname) => Some(vec![hostname]),
                None => {
                    warn!(url = %active.url, "Active tab has no hostname, clearing unscoped");
                    None
                }
            }
        } else {
            None
        };

        let now_ms = chrono::Utc::now().timestamp_millis();
        let since = options.clear_since.since_ms(now_ms);

        let data_types =
            resolve_data_types(selection, &options, self.services.enabled_types.as_ref()).await?;
        if data_types.is_empty() {
            debug!("Resolved data-type set is empty, aborting silently");
            return Ok(ClearOutcome::NothingToClear);
        }

        debug!(
            selection = selection.as_str(),
            since,
            close_tabs = ?options.close_tabs,
            reload_tabs = ?options.reload_tabs,
            data_types = data_types.len(),
            "Starting clear run"
        );

        // Phase 2: apply the close policy.
        let mut report = ClearReport {
            since,
            ..ClearReport::default()
        };
        self.close_tabs(&options, active_tab_id, platform, &mut report)
            .await;

        // Phase 3: invoke removal. Terminal on failure.
        let active_closed = report.closed_tab_ids.contains(&active_tab_id);
        let mut active_reloaded = false;
        self.remove_data(
            data_types,
            hostnames,
            since,
            platform,
            active_tab_id,
            active_closed,
            &mut active_reloaded,
            &mut report,
        )
        .await?;

        // Phase 4: finalize.
        if options.close_tabs == ClosePolicy::Exit {
            // The window set is gone; no reload policy applies.
            if let Some(temp_tab_id) = report.temp_tab {
                if let Err(e) = self.services.tabs.remove(&[temp_tab_id]).await {
                    warn!(?temp_tab_id, error = %e, "Failed to remove placeholder tab");
                }
            }
            info!(closed = report.closed_tab_ids.len(), "Clear run finished (exit)");
            return Ok(ClearOutcome::Cleared(report));
        }

        if options.notify_on_success {
            self.notify(Notification::info(
                MSG_DATA_CLEARED,
                Some(SUCCESS_NOTIFICATION_TIMEOUT),
            ))
            .await;
        }

        self.reload_tabs(
            &options,
            active_tab_id,
            active_closed,
            active_reloaded,
            &mut report,
        )
        .await?;

        info!(
            closed = report.closed_tab_ids.len(),
            reloaded = report.reloaded_tab_ids.len(),
            removal_invoked = report.removal_invoked,
            "Clear run finished"
        );
        Ok(ClearOutcome::Cleared(report))
    }

    /// Close step: compute the plan from one census, create the placeholder
    /// if required, then remove the planned batches. Best-effort throughout.
    async fn close_tabs(
        &self,
        options: &ClearOptions,
        active_tab_id: TabId,
        platform: Platform,
        report: &mut ClearReport,
    ) {
        if options.close_tabs == ClosePolicy::None {
            return;
        }

        let census = match TabCensus::take(self.services.tabs.as_ref()).await {
            Ok(census) => census,
            Err(e) => {
                warn!(error = %e, "Tab census failed, skipping close step");
                return;
            }
        };

        let plan = plan_close(
            options.close_tabs,
            options.close_pinned_tabs,
            &census,
            active_tab_id,
            platform.allows_background_tabs(),
        );

        if !plan.background_tab_ids.is_empty() {
            match self.services.tabs.remove(&plan.background_tab_ids).await {
                Ok(()) => report
                    .closed_tab_ids
                    .extend_from_slice(&plan.background_tab_ids),
                Err(e) => warn!(error = %e, "Failed to close background-window tabs"),
            }
        }

        if let Some(spec) = plan.temp_tab {
            let params = CreateTab {
                url: spec.blank_page.then(|| BLANK_PAGE_URL.to_string()),
                active: false,
            };
            match self.services.tabs.create(params).await {
                Ok(tab_id) => {
                    debug!(?tab_id, blank = spec.blank_page, "Created placeholder tab");
                    report.temp_tab = Some(tab_id);
                }
                Err(e) => warn!(error = %e, "Failed to create placeholder tab"),
            }
        }

        if !plan.focused_tab_ids.is_empty() {
            match self.services.tabs.remove(&plan.focused_tab_ids).await {
                Ok(()) => report
                    .closed_tab_ids
                    .extend_from_slice(&plan.focused_tab_ids),
                Err(e) => warn!(error = %e, "Failed to close focused-window tabs"),
            }
        }
    }

    /// Removal step. The engine that cannot honor a since-threshold for
    /// local storage gets the dedicated whole-store call first; the bulk
    /// call then covers whatever remains. Any failure ends the run after the
    /// error notification.
    #[allow(clippy::too_many_arguments)]
    async fn remove_data(
        &self,
        mut data_types: DataTypeSet,
        hostnames: Option<Vec<String>>,
        since: i64,
        platform: Platform,
        active_tab_id: TabId,
        active_closed: bool,
        active_reloaded: &mut bool,
        report: &mut ClearReport,
    ) -> Result<(), ClearError> {
        if data_types.contains(DataType::LocalStorage)
            && since != 0
            && platform.target == TargetEnv::Firefox
        {
            debug!("Removing local storage through the dedicated call");
            if let Err(e) = self.services.removal.remove_local_storage().await {
                self.notify(Notification::error(MSG_DATA_NOT_CLEARED)).await;
                return Err(ClearError::RemovalFailed(e));
            }
            data_types.remove(DataType::LocalStorage);
        }

        if data_types.is_empty() {
            return Ok(());
        }

        let request = RemovalRequest {
            hostnames,
            since,
            data_types,
        };
        info!(
            since = request.since,
            scoped = request.hostnames.is_some(),
            data_types = request.data_types.len(),
            "Invoking browsing-data removal"
        );
        if let Err(e) = self.services.removal.remove(&request).await {
            self.notify(Notification::error(MSG_DATA_NOT_CLEARED)).await;
            return Err(ClearError::RemovalFailed(e));
        }
        report.removal_invoked = true;

        // Flush removed state out of the surviving active tab right away.
        // Still part of the removal step: a failure here surfaces the same
        // error notification and ends the run.
        if !active_closed {
            if let Err(e) = self.services.tabs.reload(active_tab_id, true).await {
                warn!(?active_tab_id, error = %e, "Post-removal active-tab reload failed");
                self.notify(Notification::error(MSG_DATA_NOT_CLEARED)).await;
                return Err(ClearError::Host(e));
            }
            *active_reloaded = true;
            report.reloaded_tab_ids.push(active_tab_id);
        }

        Ok(())
    }

    /// Reload step: re-census the open tabs and fan the bypass-cache reloads
    /// out concurrently, joining before the run completes. The placeholder
    /// tab and the already-reloaded active tab are skipped.
    async fn reload_tabs(
        &self,
        options: &ClearOptions,
        active_tab_id: TabId,
        active_closed: bool,
        active_reloaded: bool,
        report: &mut ClearReport,
    ) -> Result<(), ClearError> {
        match options.reload_tabs {
            ReloadPolicy::None => Ok(()),
            ReloadPolicy::Active => {
                let active_survived = matches!(
                    options.close_tabs,
                    ClosePolicy::None | ClosePolicy::AllButActive
                ) && !active_closed;
                if active_survived && !active_reloaded {
                    self.services.tabs.reload(active_tab_id, true).await?;
                    report.reloaded_tab_ids.push(active_tab_id);
                }
                Ok(())
            }
            ReloadPolicy::All | ReloadPolicy::AllButActive => {
                let skip_active = options.reload_tabs == ReloadPolicy::AllButActive;
                let tabs = self.services.tabs.query(TabQuery::all_windows()).await?;
                let targets: Vec<TabId> = tabs
                    .iter()
                    .filter(|tab| {
                        Some(tab.id) != report.temp_tab
                            && !(skip_active && tab.id == active_tab_id)
                            && !(active_reloaded && tab.id == active_tab_id)
                    })
                    .map(|tab| tab.id)
                    .collect();

                debug!(count = targets.len(), "Reloading tabs");
                let reloads = targets
                    .iter()
                    .map(|&tab_id| self.services.tabs.reload(tab_id, true));
                futures::future::try_join_all(reloads).await?;
                report.reloaded_tab_ids.extend_from_slice(&targets);
                Ok(())
            }
        }
    }

    /// Notification rendering is external and never worth failing a run over.
    async fn notify(&self, notification: Notification) {
        let message_id = notification.message_id.clone();
        if let Err(e) = self.services.notifications.show(notification).await {
            warn!(message_id = %message_id, error = %e, "Failed to show notification");
        }
    }
}

fn hostname_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}
