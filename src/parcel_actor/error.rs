//! Error types for the Parcel actor.

use crate::model::{ParcelId, ParcelState};
use thiserror::Error;

/// Errors that can occur during parcel store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParcelError {
    /// A parcel with this tracking code is already registered.
    #[error("Tracking code already registered: {0}")]
    DuplicateTrackingCode(String),

    /// The registration payload is invalid.
    #[error("Invalid registration: {0}")]
    InvalidRegistration(String),

    /// The event does not describe the single legal step out of the expected state.
    #[error("Illegal transition {from} -> {to}")]
    IllegalTransition { from: ParcelState, to: ParcelState },

    /// The event was addressed to a different parcel.
    #[error("Event for {event_parcel} submitted to {parcel}")]
    WrongParcel {
        parcel: ParcelId,
        event_parcel: ParcelId,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ParcelError {
    fn from(msg: String) -> Self {
        ParcelError::ActorCommunicationError(msg)
    }
}
