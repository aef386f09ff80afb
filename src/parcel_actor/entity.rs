//! Entity trait implementation for [`ParcelRecord`].
//!
//! Registration validation and the compare-and-append step live here. Because the
//! [`ResourceActor`](crate::framework::ResourceActor) runs one request at a time, the check of
//! the current state and the write of state + event cannot interleave with another request.

use super::actions::{ParcelAction, ParcelActionResult};
use super::error::ParcelError;
use crate::framework::ActorEntity;
use crate::model::{
    Parcel, ParcelId, ParcelRecord, ParcelRegistration, ParcelState, TrackingCode, TransitionEvent,
};
use async_trait::async_trait;
use chrono::Duration;

#[async_trait]
impl ActorEntity for ParcelRecord {
    type Id = ParcelId;
    type Key = TrackingCode;
    type Create = ParcelRegistration;
    type Action = ParcelAction;
    type ActionResult = ParcelActionResult;
    type Context = ();
    type Error = ParcelError;

    /// Builds a `REGISTERED` parcel with an empty audit trail.
    fn from_create_params(id: ParcelId, params: ParcelRegistration) -> Result<Self, ParcelError> {
        let tracking_code = TrackingCode::normalize(&params.tracking_code).ok_or_else(|| {
            ParcelError::InvalidRegistration(format!(
                "malformed tracking code {:?}",
                params.tracking_code
            ))
        })?;
        // Written this way round so NaN is rejected too.
        if !(params.weight_kg > 0.0) {
            return Err(ParcelError::InvalidRegistration(format!(
                "weight must be positive, got {}",
                params.weight_kg
            )));
        }
        if params.origin == params.destination {
            return Err(ParcelError::InvalidRegistration(format!(
                "origin and destination are both {}",
                params.origin
            )));
        }

        Ok(ParcelRecord {
            parcel: Parcel {
                id,
                tracking_code,
                origin: params.origin,
                destination: params.destination,
                state: ParcelState::Registered,
                description: params.description,
                weight_kg: params.weight_kg,
                sender: params.sender,
                recipient: params.recipient,
                registered_at: params.registered_at,
            },
            events: Vec::new(),
        })
    }

    fn key(&self) -> TrackingCode {
        self.parcel.tracking_code.clone()
    }

    async fn handle_action(
        &mut self,
        action: ParcelAction,
        _ctx: &Self::Context,
    ) -> Result<ParcelActionResult, ParcelError> {
        match action {
            ParcelAction::CompareAndAppend { expected, event } => {
                self.compare_and_append(expected, event)
            }
        }
    }
}

impl ParcelRecord {
    fn compare_and_append(
        &mut self,
        expected: ParcelState,
        mut event: TransitionEvent,
    ) -> Result<ParcelActionResult, ParcelError> {
        if event.parcel_id != self.parcel.id {
            return Err(ParcelError::WrongParcel {
                parcel: self.parcel.id,
                event_parcel: event.parcel_id,
            });
        }
        if self.parcel.state != expected {
            return Ok(ParcelActionResult::StateMismatch {
                actual: self.parcel.state,
            });
        }
        if event.from != expected || expected.next() != Some(event.to) {
            return Err(ParcelError::IllegalTransition {
                from: event.from,
                to: event.to,
            });
        }

        // Event time must be strictly increasing along the trail.
        let floor = self
            .events
            .last()
            .map(|last| last.at)
            .unwrap_or(self.parcel.registered_at);
        if event.at <= floor {
            event.at = floor + Duration::milliseconds(1);
        }

        self.parcel.state = event.to;
        self.events.push(event);
        Ok(ParcelActionResult::Appended(self.clone()))
    }
}
