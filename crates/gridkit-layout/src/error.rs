#![forbid(unsafe_code)]

//! Error types.

use thiserror::Error;

/// Failure reported by a host collaborator (rect provider, rect consumer,
/// overlay surface).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The widget behind the handle no longer exists.
    #[error("item no longer exists")]
    StaleItem,
    /// Any other host-side failure.
    #[error("host call failed: {0}")]
    Failed(String),
}

impl HostError {
    /// Convenience constructor for [`HostError::Failed`].
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    #[inline]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleItem)
    }
}

/// Errors surfaced by grid operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A caller-supplied value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// `gridkit_core::context::initialize` was never called.
    #[error("layout context not initialized; call gridkit_core::context::initialize() first")]
    ContextNotInitialized,
    /// A host collaborator failed during a layout pass or visibility push.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl GridError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;
