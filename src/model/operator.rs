use crate::model::PointId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of an authenticated operator, as supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub String);

impl Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The operator performing a warehouse action.
///
/// An operator without an assigned point is administrative: not tied to one physical
/// location.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub id: OperatorId,
    pub assigned_point: Option<PointId>,
}

impl Operator {
    /// Operator stationed at `point`.
    pub fn at_point(id: impl Into<String>, point: PointId) -> Self {
        Self {
            id: OperatorId(id.into()),
            assigned_point: Some(point),
        }
    }

    /// Operator with no assigned point.
    pub fn administrative(id: impl Into<String>) -> Self {
        Self {
            id: OperatorId(id.into()),
            assigned_point: None,
        }
    }

    pub fn is_administrative(&self) -> bool {
        self.assigned_point.is_none()
    }
}
