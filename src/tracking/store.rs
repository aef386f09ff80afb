//! Boundary contracts for the collaborators the tracking core reads and writes through.
//!
//! The core never touches a parcel record directly. Everything goes through
//! [`ParcelStore`], whose only write is [`ParcelStore::compare_and_append`]: the state
//! check, the state change and the audit append happen as one unit or not at all.

use crate::model::{
    Parcel, ParcelId, ParcelRecord, ParcelState, PointId, PointSummary, TrackingCode,
    TransitionEvent,
};
use async_trait::async_trait;
use thiserror::Error;

/// Failure of a storage collaborator. Always an infrastructure fault, never a
/// business outcome.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The backend could not be reached or did not answer.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered but refused the request.
    #[error("store rejected request: {0}")]
    Rejected(String),
}

/// Outcome of a compare-and-append.
#[derive(Debug, Clone, PartialEq)]
pub enum CasOutcome {
    /// State moved and the event was appended. `event` is the event as stored.
    Applied { parcel: Parcel, event: TransitionEvent },
    /// The parcel was no longer in the expected state; nothing was written.
    Conflict { actual: ParcelState },
}

/// Parcel persistence as required by the tracking core.
#[async_trait]
pub trait ParcelStore: Send + Sync {
    /// Exact match on an already normalized code.
    async fn find_by_tracking_code(&self, code: &TrackingCode)
        -> Result<Option<Parcel>, StoreError>;

    async fn find_by_id(&self, id: ParcelId) -> Result<Option<Parcel>, StoreError>;

    /// The parcel and all its transition events (in append order), read together so
    /// the state and the trail always agree.
    async fn snapshot(&self, id: ParcelId) -> Result<Option<ParcelRecord>, StoreError>;

    /// Atomically: if the parcel is in `expected`, set its state to `event.to` and append
    /// `event`.
    async fn compare_and_append(
        &self,
        id: ParcelId,
        expected: ParcelState,
        event: TransitionEvent,
    ) -> Result<CasOutcome, StoreError>;
}

/// Read-only access to operating points.
#[async_trait]
pub trait PointsDirectory: Send + Sync {
    /// `Ok(None)` when the directory does not know the point.
    async fn get_point(&self, id: PointId) -> Result<Option<PointSummary>, StoreError>;
}
