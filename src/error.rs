//! Error types for the browsing-data clear orchestration core.

use crate::host::TabId;
use thiserror::Error;

/// Failures reported by the injected host services.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("Host rejected the call: {0}")]
    Rejected(String),

    #[error("Tab not found: {0:?}")]
    TabNotFound(TabId),

    #[error("Host disconnected: {0}")]
    Disconnected(String),
}

/// Errors surfaced by a clear-orchestrator run.
///
/// Tab closures are best-effort and never produce a `ClearError`; only the
/// removal-service call and the reload fan-out are fatal for a run.
#[derive(Debug, Clone, Error)]
pub enum ClearError {
    /// The data-removal call was rejected by the host. The run has already
    /// shown the error notification; closed tabs stay closed.
    #[error("Browsing data removal failed: {0}")]
    RemovalFailed(#[source] HostError),

    #[error("Host call failed: {0}")]
    Host(#[from] HostError),
}

/// Submitting work to an [`ActionSerializer`](crate::serializer::ActionSerializer)
/// that has shut down.
#[derive(Debug, Clone, Error)]
#[error("Action serializer is shut down")]
pub struct SerializerClosed;

/// Errors from a browser-action state recomputation.
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    #[error(transparent)]
    Closed(#[from] SerializerClosed),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Invalid ambient configuration (logging setup).
#[derive(Debug, Clone, Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(pub String);

/// Errors from dispatching an inbound host message.
#[derive(Debug, Clone, Error)]
pub enum MessageError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Action update failed: {0}")]
    Action(#[from] ActionError),
}
