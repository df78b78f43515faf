//! Error types for the Account actor.

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// An account with the same e-mail (ignoring case) already exists.
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    /// A required field is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The account was changed but could not be written to storage.
    #[error("Account storage error: {0}")]
    Persistence(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
