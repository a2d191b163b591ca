//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PanelError`]
//! via `From`. Adapter failures are boxed into [`PanelError::Gateway`] so the
//! domain never names a transport crate.

/// Top-level error for autopanel operations.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// A domain invariant was violated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced automation is not part of the current list.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The backend could not complete the request (transport failure,
    /// timeout or non-success status).
    #[error("backend request failed: {0}")]
    Gateway(Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An automation identifier must not be empty.
    #[error("automation id must not be empty")]
    EmptyId,

    /// An automation name must not be empty.
    #[error("name must not be empty")]
    EmptyName,

    /// An automation status must not be empty.
    #[error("status must not be empty")]
    EmptyStatus,

    /// The backend answered an update with a record carrying another identity.
    #[error("expected automation {expected}, got {actual}")]
    IdentityMismatch { expected: String, actual: String },
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
