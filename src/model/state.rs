//! The parcel lifecycle as a single ordered sequence.
//!
//! Every forward step a parcel can take is `SEQUENCE[i] -> SEQUENCE[i + 1]`; there is no
//! branching, no cycle and no way back. Anything else that needs "the next state" or "how
//! far along is this parcel" asks this module.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Lifecycle state of a parcel (encomienda).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParcelState {
    /// Registered at the origin counter. Initial state.
    Registered,
    /// Received into a warehouse.
    InWarehouse,
    /// Travelling towards the destination point.
    InTransit,
    /// Unloaded at the destination point, waiting for the recipient.
    ArrivedAtDestination,
    /// Handed over to the recipient. Terminal state.
    Retrieved,
}

impl ParcelState {
    /// All states in lifecycle order.
    pub const SEQUENCE: [ParcelState; 5] = [
        ParcelState::Registered,
        ParcelState::InWarehouse,
        ParcelState::InTransit,
        ParcelState::ArrivedAtDestination,
        ParcelState::Retrieved,
    ];

    /// Position of this state in [`ParcelState::SEQUENCE`].
    pub fn ordinal(self) -> usize {
        match self {
            ParcelState::Registered => 0,
            ParcelState::InWarehouse => 1,
            ParcelState::InTransit => 2,
            ParcelState::ArrivedAtDestination => 3,
            ParcelState::Retrieved => 4,
        }
    }

    /// The single legal successor, or `None` for the terminal state.
    pub fn next(self) -> Option<ParcelState> {
        Self::SEQUENCE.get(self.ordinal() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Successor lookup from a stored state code.
    ///
    /// Codes that are not one of the five states have no successor.
    pub fn successor_of(raw: &str) -> Option<ParcelState> {
        raw.parse::<ParcelState>().ok().and_then(ParcelState::next)
    }

    /// Wire code, e.g. `IN_TRANSIT`.
    pub fn as_str(self) -> &'static str {
        match self {
            ParcelState::Registered => "REGISTERED",
            ParcelState::InWarehouse => "IN_WAREHOUSE",
            ParcelState::InTransit => "IN_TRANSIT",
            ParcelState::ArrivedAtDestination => "ARRIVED_AT_DESTINATION",
            ParcelState::Retrieved => "RETRIEVED",
        }
    }

    /// Human-readable label for progress indicators.
    pub fn label(self) -> &'static str {
        match self {
            ParcelState::Registered => "Registered",
            ParcelState::InWarehouse => "In warehouse",
            ParcelState::InTransit => "In transit",
            ParcelState::ArrivedAtDestination => "Arrived at destination",
            ParcelState::Retrieved => "Retrieved",
        }
    }
}

impl Display for ParcelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a state code does not name one of the lifecycle states.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown parcel state: {0}")]
pub struct UnknownState(pub String);

impl FromStr for ParcelState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::SEQUENCE
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_linear_and_ends_in_retrieved() {
        let mut state = ParcelState::Registered;
        let mut walked = vec![state];
        while let Some(next) = state.next() {
            assert_eq!(next.ordinal(), state.ordinal() + 1);
            state = next;
            walked.push(state);
        }
        assert_eq!(walked, ParcelState::SEQUENCE.to_vec());
        assert!(ParcelState::Retrieved.is_terminal());
        assert!(!ParcelState::ArrivedAtDestination.is_terminal());
    }

    #[test]
    fn test_successor_of_unknown_code_is_none() {
        assert_eq!(
            ParcelState::successor_of("in_transit"),
            Some(ParcelState::ArrivedAtDestination)
        );
        assert_eq!(ParcelState::successor_of("RETRIEVED"), None);
        assert_eq!(ParcelState::successor_of("CANCELLED"), None);
        assert_eq!(ParcelState::successor_of(""), None);
    }

    #[test]
    fn test_wire_codes_match_serde() {
        for state in ParcelState::SEQUENCE {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
            assert_eq!(state.as_str().parse::<ParcelState>().unwrap(), state);
        }
    }
}
