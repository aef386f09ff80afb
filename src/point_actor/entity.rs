//! Entity trait implementation for the [`Point`] domain type.
//!
//! Points are read-only once created, so the action type is uninhabited.

use super::error::PointError;
use crate::framework::ActorEntity;
use crate::model::{Point, PointCreate, PointId};
use async_trait::async_trait;

/// Points accept no actions.
#[derive(Debug, Clone)]
pub enum PointAction {}

#[async_trait]
impl ActorEntity for Point {
    type Id = PointId;
    type Key = String;
    type Create = PointCreate;
    type Action = PointAction;
    type ActionResult = ();
    type Context = ();
    type Error = PointError;

    fn from_create_params(id: PointId, params: PointCreate) -> Result<Self, PointError> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(PointError::ValidationError("point name is empty".to_string()));
        }
        Ok(Self {
            id,
            name,
            city: params.city.trim().to_string(),
            kind: params.kind,
        })
    }

    /// Points are unique by name.
    fn key(&self) -> String {
        self.name.clone()
    }

    async fn handle_action(
        &mut self,
        action: PointAction,
        _ctx: &Self::Context,
    ) -> Result<(), PointError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PointKind;

    #[test]
    fn test_from_create_params_trims_and_validates() {
        let point = Point::from_create_params(
            PointId(3),
            PointCreate {
                name: " Tarapoto ".into(),
                city: "Tarapoto".into(),
                kind: PointKind::Agency,
            },
        )
        .unwrap();
        assert_eq!(point.key(), "Tarapoto");

        let blank = Point::from_create_params(
            PointId(4),
            PointCreate {
                name: "  ".into(),
                city: "Lima".into(),
                kind: PointKind::Terminal,
            },
        );
        assert!(matches!(blank, Err(PointError::ValidationError(_))));
    }
}
