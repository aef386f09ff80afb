use crate::model::{OperatorId, ParcelId, ParcelState, PointId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Evidence that the recipient was identified at handover (e.g. an ID document number).
///
/// Opaque to this crate: the only rule is that it must not be blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalProof(pub String);

impl RetrievalProof {
    pub fn new(evidence: impl Into<String>) -> Self {
        Self(evidence.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Audit record of one state change. Never edited or removed once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub parcel_id: ParcelId,
    pub from: ParcelState,
    pub to: ParcelState,
    pub at: DateTime<Utc>,
    pub operator: OperatorId,
    /// Point the operator acted from; `None` for administrative operators.
    pub point: Option<PointId>,
    pub note: Option<String>,
    /// Present only on the terminal `RETRIEVED` event.
    pub retrieval_proof: Option<RetrievalProof>,
}
