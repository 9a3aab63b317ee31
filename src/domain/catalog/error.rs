//! Upstream catalog errors

use std::fmt;

use thiserror::Error;

use super::UpstreamOperation;

/// What went wrong talking to the provider. Diagnostic only: every kind is
/// reported to clients the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// The request never produced a usable HTTP response
    Transport,
    /// The provider answered with a non-`Ok` envelope
    Rejected,
    /// The response body did not have the expected shape
    Malformed,
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Rejected => write!(f, "rejected"),
            Self::Malformed => write!(f, "malformed"),
        }
    }
}

/// Failure of an upstream catalog call (bad gateway class)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UpstreamError {
    pub operation: UpstreamOperation,
    pub kind: UpstreamErrorKind,
    pub message: String,
}

impl UpstreamError {
    pub fn new(
        operation: UpstreamOperation,
        kind: UpstreamErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
        }
    }

    pub fn transport(operation: UpstreamOperation) -> Self {
        Self::new(operation, UpstreamErrorKind::Transport, operation.fallback_message())
    }

    pub fn malformed(operation: UpstreamOperation) -> Self {
        Self::new(operation, UpstreamErrorKind::Malformed, operation.fallback_message())
    }

    /// Non-`Ok` envelope; keeps the provider's description when it has one
    pub fn rejected(operation: UpstreamOperation, description: Option<&str>) -> Self {
        let message = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(operation.fallback_message());

        Self::new(operation, UpstreamErrorKind::Rejected, message)
    }
}
