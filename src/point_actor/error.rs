//! Error types for the Point actor.

use thiserror::Error;

/// Errors that can occur during point directory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PointError {
    /// A point with the same name already exists.
    #[error("Point already exists: {0}")]
    AlreadyExists(String),

    /// The point data provided is invalid.
    #[error("Point validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PointError {
    fn from(msg: String) -> Self {
        PointError::ActorCommunicationError(msg)
    }
}
