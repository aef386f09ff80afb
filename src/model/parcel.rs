//! Parcel (encomienda) data.
//!
//! [`Parcel`] is what callers see; [`ParcelRecord`] is what the parcel store owns: the
//! parcel plus its append-only list of [`TransitionEvent`]s. Keeping both in one record is
//! what lets the store change the state and append the audit event in a single step.

use crate::model::{ParcelState, PointId, TransitionEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Parcels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParcelId(pub u32);

impl From<u32> for ParcelId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parcel_{}", self.0)
    }
}

/// Human-readable tracking code printed on labels and QR codes, e.g. `ENC-2025-0001`.
///
/// Always stored in normalized form: trimmed, ASCII upper-case, 1 to 64 characters of
/// `A-Z`, `0-9` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingCode(String);

impl TrackingCode {
    pub const MAX_LEN: usize = 64;

    /// Normalizes operator or scanner input. Returns `None` for anything malformed.
    pub fn normalize(raw: &str) -> Option<TrackingCode> {
        let code = raw.trim().to_ascii_uppercase();
        let well_formed = !code.is_empty()
            && code.len() <= Self::MAX_LEN
            && code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
        well_formed.then_some(TrackingCode(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TrackingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TrackingCode {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        TrackingCode::normalize(&raw).ok_or_else(|| format!("malformed tracking code: {raw:?}"))
    }
}

impl From<TrackingCode> for String {
    fn from(code: TrackingCode) -> Self {
        code.0
    }
}

/// Sender or recipient contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// A shipped parcel.
///
/// `tracking_code`, `origin` and `destination` never change after registration; `state`
/// only moves forward, and only through the parcel store's compare-and-append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: ParcelId,
    pub tracking_code: TrackingCode,
    pub origin: PointId,
    pub destination: PointId,
    pub state: ParcelState,
    pub description: String,
    pub weight_kg: f64,
    pub sender: Contact,
    pub recipient: Contact,
    pub registered_at: DateTime<Utc>,
}

/// Payload for registering a new parcel.
#[derive(Debug, Clone)]
pub struct ParcelRegistration {
    pub tracking_code: String,
    pub origin: PointId,
    pub destination: PointId,
    pub description: String,
    pub weight_kg: f64,
    pub sender: Contact,
    pub recipient: Contact,
    pub registered_at: DateTime<Utc>,
}

/// A parcel together with its audit trail, as held by the parcel store.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelRecord {
    pub parcel: Parcel,
    /// Append-only, in lifecycle order.
    pub events: Vec<TransitionEvent>,
}
