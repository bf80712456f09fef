//! Structured diagnostics for degraded suggestion calls.
//!
//! Every fallback the engine applies is observable here, since the public
//! return values deliberately hide failure. Hosts can plug their own sink;
//! the default logs through `tracing`.

use strum::Display;
use tracing::warn;

use crate::error::ProviderError;

/// What went wrong on a degraded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DiagnosticKind {
    /// The provider was unreachable or answered with a non-2xx status.
    TransportFailure,
    /// The provider answered, but not with the documented completion shape.
    MalformedReply,
    /// The completion arrived, but the requested value could not be
    /// extracted from it.
    MalformedContent,
}

impl From<&ProviderError> for DiagnosticKind {
    fn from(error: &ProviderError) -> Self {
        match error {
            ProviderError::Transport { .. } | ProviderError::Status { .. } => {
                Self::TransportFailure
            }
            ProviderError::Decode { .. } | ProviderError::EmptyReply => Self::MalformedReply,
        }
    }
}

/// One degraded call, recorded at the moment the fallback is chosen.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub kind: DiagnosticKind,
    /// Engine operation that degraded, e.g. `"priority_score"`.
    pub operation: &'static str,
    pub detail: String,
}

impl DiagnosticEvent {
    pub fn new(kind: DiagnosticKind, operation: &'static str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            detail: detail.into(),
        }
    }
}

/// Sink for diagnostic events. Implement for any backend.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

/// Default sink that logs each event through `tracing`.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, event: &DiagnosticEvent) {
        warn!(
            kind = %event.kind,
            operation = event.operation,
            detail = %event.detail,
            "suggestion.degraded"
        );
    }
}
