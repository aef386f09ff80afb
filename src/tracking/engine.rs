//! The lifecycle engine: the only writer of parcel state.
//!
//! `advance` runs the same steps every time, in this order:
//!
//! 1. read the parcel fresh from the store (never trust a caller-held state),
//! 2. compute the successor, rejecting a parcel that is already terminal,
//! 3. for the handover step only, check that the operator stands at the destination,
//! 4. for the handover step only, require retrieval proof,
//! 5. compare-and-append the event against the state read in step 1.
//!
//! Step 5 is what serializes operators racing on the same parcel: whoever loses the
//! compare gets [`TrackingError::ConcurrentModification`] and nothing is written for them.

use crate::model::{Operator, Parcel, ParcelId, ParcelState, RetrievalProof, TransitionEvent};
use crate::tracking::clock::{Clock, SystemClock};
use crate::tracking::error::{store_failure, TrackingError};
use crate::tracking::store::{CasOutcome, ParcelStore, PointsDirectory};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Optional input accompanying an advance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceRequest {
    pub note: Option<String>,
    /// Required when the next state is `RETRIEVED`, ignored otherwise.
    pub proof: Option<RetrievalProof>,
}

impl AdvanceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_proof(mut self, proof: RetrievalProof) -> Self {
        self.proof = Some(proof);
        self
    }
}

/// A successful advance: the parcel as it is now and the event that was appended.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceOutcome {
    pub parcel: Parcel,
    pub event: TransitionEvent,
}

pub struct LifecycleEngine<S, D> {
    store: Arc<S>,
    points: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<S, D> Clone for LifecycleEngine<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            points: self.points.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<S: ParcelStore, D: PointsDirectory> LifecycleEngine<S, D> {
    pub fn new(store: Arc<S>, points: Arc<D>) -> Self {
        Self {
            store,
            points,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the wall clock used to stamp events.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Moves the parcel one step forward on behalf of `operator`.
    #[instrument(skip(self, operator, request), fields(%parcel_id, operator = %operator.id))]
    pub async fn advance(
        &self,
        parcel_id: ParcelId,
        operator: &Operator,
        request: AdvanceRequest,
    ) -> Result<AdvanceOutcome, TrackingError> {
        let parcel = self
            .store
            .find_by_id(parcel_id)
            .await
            .map_err(store_failure)?
            .ok_or(TrackingError::NotFound)?;
        let current = parcel.state;

        let Some(target) = current.next() else {
            info!(code = %parcel.tracking_code, state = %current, "Parcel already terminal");
            return Err(TrackingError::NoFurtherTransition {
                tracking_code: parcel.tracking_code,
                state: current,
            });
        };

        let retrieval_proof = if target == ParcelState::Retrieved {
            self.authorize_handover(&parcel, operator).await?;
            match request.proof {
                Some(proof) if !proof.is_blank() => Some(proof),
                _ => {
                    info!(code = %parcel.tracking_code, "Retrieval without proof");
                    return Err(TrackingError::MissingRetrievalProof);
                }
            }
        } else {
            None
        };

        let event = TransitionEvent {
            parcel_id,
            from: current,
            to: target,
            at: self.clock.now(),
            operator: operator.id.clone(),
            point: operator.assigned_point,
            note: request
                .note
                .map(|note| note.trim().to_string())
                .filter(|note| !note.is_empty()),
            retrieval_proof,
        };

        match self
            .store
            .compare_and_append(parcel_id, current, event)
            .await
            .map_err(store_failure)?
        {
            CasOutcome::Applied { parcel, event } => {
                info!(code = %parcel.tracking_code, from = %event.from, to = %event.to, "Advanced");
                Ok(AdvanceOutcome { parcel, event })
            }
            CasOutcome::Conflict { actual } => {
                warn!(expected = %current, %actual, "Lost advance race");
                Err(TrackingError::ConcurrentModification { actual })
            }
        }
    }

    /// Only the destination point, or an operator with no assigned point, may hand over.
    async fn authorize_handover(
        &self,
        parcel: &Parcel,
        operator: &Operator,
    ) -> Result<(), TrackingError> {
        let Some(assigned) = operator.assigned_point else {
            return Ok(());
        };
        if assigned == parcel.destination {
            return Ok(());
        }

        let destination_name = self
            .points
            .get_point(parcel.destination)
            .await
            .map_err(store_failure)?
            .map(|point| point.name)
            .unwrap_or_else(|| parcel.destination.to_string());
        warn!(
            code = %parcel.tracking_code,
            %assigned,
            destination = %parcel.destination,
            "Handover refused outside destination"
        );
        Err(TrackingError::NotAuthorizedForDestination {
            destination: parcel.destination,
            destination_name,
        })
    }
}
