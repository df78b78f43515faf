//! # Framework Errors
//!
//! Errors raised by the actor runtime itself, independent of any entity kind.
//! Entity failures are carried inside [`FrameworkError::EntityError`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Snapshot failed: {0}")]
    Persistence(String),
}
