//! Message Routing
//!
//! Inbound request shapes from the host runtime and their dispatch onto the
//! orchestrator, the action controller, and the platform/tab services. The
//! wire shapes are the host's JSON messages; each request produces either no
//! response, a value, or triggers the orchestrator or serializer.

use crate::action::ActionController;
use crate::data_types::DataTypeSelection;
use crate::error::MessageError;
use crate::host::{CreateTab, Platform, PlatformService, TabService};
use crate::orchestrator::ClearOrchestrator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Inbound host message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id")]
pub enum Request {
    /// Popup submitted a selection to clear.
    #[serde(rename = "actionPopupSubmit")]
    ActionPopupSubmit { item: DataTypeSelection },
    #[serde(rename = "getPlatform")]
    GetPlatform,
    /// Persisted options changed; the action state must be recomputed.
    #[serde(rename = "optionChange")]
    OptionChange,
    #[serde(rename = "showPage")]
    ShowPage { url: String },
}

/// Value returned to the host for responding requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Platform(Platform),
}

pub struct MessageRouter {
    orchestrator: Arc<ClearOrchestrator>,
    action: Arc<ActionController>,
    platform: Arc<dyn PlatformService>,
    tabs: Arc<dyn TabService>,
}

impl MessageRouter {
    pub fn new(
        orchestrator: Arc<ClearOrchestrator>,
        action: Arc<ActionController>,
        platform: Arc<dyn PlatformService>,
        tabs: Arc<dyn TabService>,
    ) -> Self {
        Self {
            orchestrator,
            action,
            platform,
            tabs,
        }
    }

    pub async fn handle(&self, request: Request) -> Result<Option<Response>, MessageError> {
        match request {
            Request::ActionPopupSubmit { item } => {
                // Fire-and-forget: the run surfaces its own failures through
                // the error notification.
                let orchestrator = Arc::clone(&self.orchestrator);
                tokio::spawn(async move {
                    if let Err(e) = orchestrator.clear(item).await {
                        error!(selection = item.as_str(), error = %e, "Popup clear failed");
                    }
                });
                Ok(None)
            }
            Request::GetPlatform => {
                let platform = self.platform.platform().await?;
                Ok(Some(Response::Platform(platform)))
            }
            Request::OptionChange => {
                self.action.refresh().await?;
                Ok(None)
            }
            Request::ShowPage { url } => {
                self.tabs
                    .create(CreateTab {
                        url: Some(url),
                        active: true,
                    })
                    .await?;
                Ok(None)
            }
        }
    }
}
