//! Named outcomes of the tracking core.

use crate::model::{ParcelState, PointId, TrackingCode};
use crate::tracking::store::StoreError;
use thiserror::Error;
use tracing::error;

/// Every way a lookup, advance or tracking request can fail.
///
/// All variants except [`TrackingError::TransportFailure`] and
/// [`TrackingError::StoreRejected`] are expected business outcomes that callers branch on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    /// No parcel matches. Malformed and absent codes are reported identically.
    #[error("no parcel found for the given code")]
    NotFound,

    /// A storage collaborator failed. Retry belongs to the caller.
    #[error("tracking store unavailable: {0}")]
    TransportFailure(String),

    /// The store answered but refused the request. Repeating it gets the same answer.
    #[error("tracking store refused the request: {0}")]
    StoreRejected(String),

    /// The parcel is already in its terminal state.
    #[error("parcel {tracking_code} is already {state} and cannot advance further")]
    NoFurtherTransition {
        tracking_code: TrackingCode,
        state: ParcelState,
    },

    /// Only the destination point may hand the parcel over.
    #[error("only {destination_name} can hand over this parcel")]
    NotAuthorizedForDestination {
        destination: PointId,
        destination_name: String,
    },

    /// Retrieval needs recipient identification evidence.
    #[error("retrieval requires proof of recipient identification")]
    MissingRetrievalProof,

    /// Another operator advanced the parcel first.
    #[error("parcel was advanced concurrently and is now {actual}")]
    ConcurrentModification { actual: ParcelState },
}

impl TrackingError {
    /// Whether repeating the request (after re-resolving, or with more input) can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TrackingError::TransportFailure(_)
                | TrackingError::MissingRetrievalProof
                | TrackingError::ConcurrentModification { .. }
        )
    }
}

impl From<StoreError> for TrackingError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(_) => TrackingError::TransportFailure(e.to_string()),
            StoreError::Rejected(_) => TrackingError::StoreRejected(e.to_string()),
        }
    }
}

/// Converts a collaborator failure, logging it as the infrastructure fault it is.
pub(crate) fn store_failure(e: StoreError) -> TrackingError {
    error!(error = %e, "Tracking store failure");
    TrackingError::from(e)
}
