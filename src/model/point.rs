//! A physical operating point (terminal, warehouse, agency).
//!
//! Points are parcel origins and destinations, and the base an operator is assigned to.
//! They are created once and only read afterwards.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u32);

impl From<u32> for PointId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "point_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Terminal,
    Warehouse,
    Agency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub city: String,
    pub kind: PointKind,
}

/// Payload for creating a new point.
#[derive(Debug, Clone)]
pub struct PointCreate {
    pub name: String,
    pub city: String,
    pub kind: PointKind,
}

/// Read-only view of a point used in rejection messages and tracking views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSummary {
    pub id: PointId,
    pub name: String,
    pub city: String,
}

impl PointSummary {
    /// Placeholder for a point the directory no longer knows.
    pub fn unknown(id: PointId) -> Self {
        Self {
            id,
            name: id.to_string(),
            city: String::new(),
        }
    }
}

impl From<&Point> for PointSummary {
    fn from(point: &Point) -> Self {
        Self {
            id: point.id,
            name: point.name.clone(),
            city: point.city.clone(),
        }
    }
}
