//! Error types for the Product actor.

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The name is empty after trimming.
    #[error("Product name must not be empty")]
    InvalidName,

    /// The quantity is NaN or infinite.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),

    /// The change was applied but could not be written to storage.
    #[error("Product storage error: {0}")]
    Persistence(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
