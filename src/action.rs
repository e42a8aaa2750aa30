//! Browser-Action State
//!
//! Recomputes the visible action element (title and popup) from the current
//! configuration. Every recomputation is submitted through the injected
//! [`ActionSerializer`], so rapid successive option changes produce strictly
//! ordered, non-overlapping updates.
//!
//! Title/popup policy: exactly one enabled data type makes the button a
//! direct trigger carrying that type's title; the combined "main" behavior
//! with several enabled types does the same with the combined title; in
//! every other case the button carries the extension name and opens the
//! popup, except that the popup is cleared when no type is enabled at all.

use crate::data_types::DataType;
use crate::error::{ActionError, HostError};
use crate::host::{BrowserAction, EnabledTypesProvider, LocaleService, OptionStore};
use crate::options::ClearAllAction;
use crate::serializer::ActionSerializer;
use std::sync::Arc;
use tracing::debug;

/// Popup document shown when several data types are selectable.
pub const ACTION_POPUP_PATH: &str = "/src/action/index.html";

pub struct ActionController {
    options: Arc<dyn OptionStore>,
    enabled_types: Arc<dyn EnabledTypesProvider>,
    action: Arc<dyn BrowserAction>,
    locale: Arc<dyn LocaleService>,
    serializer: Arc<ActionSerializer>,
}

impl ActionController {
    pub fn new(
        options: Arc<dyn OptionStore>,
        enabled_types: Arc<dyn EnabledTypesProvider>,
        action: Arc<dyn BrowserAction>,
        locale: Arc<dyn LocaleService>,
        serializer: Arc<ActionSerializer>,
    ) -> Self {
        Self {
            options,
            enabled_types,
            action,
            locale,
            serializer,
        }
    }

    /// Queue a recomputation and wait for it to run.
    pub async fn refresh(&self) -> Result<(), ActionError> {
        let options = Arc::clone(&self.options);
        let enabled_types = Arc::clone(&self.enabled_types);
        let action = Arc::clone(&self.action);
        let locale = Arc::clone(&self.locale);

        self.serializer
            .run(async move { recompute(options, enabled_types, action, locale).await })
            .await??;
        Ok(())
    }
}

async fn recompute(
    options: Arc<dyn OptionStore>,
    enabled_types: Arc<dyn EnabledTypesProvider>,
    action: Arc<dyn BrowserAction>,
    locale: Arc<dyn LocaleService>,
) -> Result<(), HostError> {
    let options = options.options().await?;
    let enabled = enabled_types.enabled_data_types(&options).await?;

    let combined = options.clear_all_data_types_action == ClearAllAction::Main && enabled.len() > 1;
    debug!(enabled = enabled.len(), combined, "Recomputing browser action");

    if enabled.len() == 1 {
        action.set_title(&locale.text(&title_key(enabled[0]))).await?;
        action.set_popup(None).await?;
    } else if combined {
        action
            .set_title(&locale.text("actionTitle_allDataTypes"))
            .await?;
        action.set_popup(None).await?;
    } else {
        action.set_title(&locale.text("extensionName")).await?;
        if enabled.is_empty() {
            action.set_popup(None).await?;
        } else {
            action.set_popup(Some(ACTION_POPUP_PATH)).await?;
        }
    }

    Ok(())
}

fn title_key(data_type: DataType) -> String {
    format!("actionTitle_{}", data_type.as_str())
}
