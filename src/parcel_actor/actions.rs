//! Custom actions for the Parcel actor.
//!
//! The parcel store has exactly one mutation: compare the current state and, if it matches,
//! append the transition event and move the state in the same step.

use crate::model::{ParcelRecord, ParcelState, TransitionEvent};

/// Custom actions for Parcel records.
#[derive(Debug, Clone)]
pub enum ParcelAction {
    /// Append `event` and set the state to `event.to`, but only if the parcel is currently
    /// in `expected`.
    CompareAndAppend {
        expected: ParcelState,
        event: TransitionEvent,
    },
}

/// Results from ParcelActions.
#[derive(Debug, Clone, PartialEq)]
pub enum ParcelActionResult {
    /// The event was appended; carries the record as it is now.
    Appended(ParcelRecord),
    /// The parcel was not in the expected state. Nothing was written.
    StateMismatch { actual: ParcelState },
}
