//! Faults raised while a handler tree runs.
//!
//! Routing misses and failed authentication are not errors: they are
//! `Outcome` values. Only delegated collaborators (codecs, renderers,
//! adapted endpoints) produce a `HandlerError`, and it is never caught
//! inside the tree.

use thiserror::Error;

/// Errors propagated to the host's fault boundary.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A value could not be encoded as JSON.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The content negotiator rejected or failed to encode a value.
    #[error("Codec error: {0}")]
    Codec(String),

    /// An external collaborator behind the handler contract failed.
    #[error("Collaborator error: {0}")]
    Collaborator(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Wrap an arbitrary collaborator error.
    pub fn collaborator<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        HandlerError::Collaborator(err.into())
    }
}

/// Result type alias using HandlerError.
pub type Result<T> = std::result::Result<T, HandlerError>;
