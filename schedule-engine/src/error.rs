//! Engine error taxonomy.
//!
//! Collaborator failures are converted into these kinds at the boundary of
//! the component that made the call. An empty-but-successful upstream
//! response is never an error: it is handled by policy (fallback window, or
//! a row with no route).

use crate::client::ClientError;
use crate::domain::DomainError;

/// Errors returned by the engine's public operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A collaborator could not be reached, failed, or timed out.
    #[error("{operation} unavailable: {message}")]
    UpstreamUnavailable {
        operation: &'static str,
        message: String,
    },

    /// Caller passed malformed input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Result belongs to a superseded run of its slot.
    #[error("stale generation {generation} for slot {slot}")]
    StaleGeneration { slot: String, generation: u64 },
}

impl EngineError {
    /// Classify a collaborator failure.
    pub fn upstream(operation: &'static str, err: ClientError) -> Self {
        EngineError::UpstreamUnavailable {
            operation,
            message: err.to_string(),
        }
    }

    /// Whether this is an upstream outage, as opposed to a caller bug.
    pub fn is_upstream(&self) -> bool {
        matches!(self, EngineError::UpstreamUnavailable { .. })
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        EngineError::InvalidInput(err.to_string())
    }
}
