use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Point, PointCreate, PointId, PointSummary};
use crate::point_actor::PointError;
use crate::tracking::{PointsDirectory, StoreError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the point actor. Implements [`PointsDirectory`] for the tracking core.
#[derive(Clone)]
pub struct PointClient {
    inner: ResourceClient<Point>,
}

impl PointClient {
    pub fn new(inner: ResourceClient<Point>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, point), fields(name = %point.name))]
    pub async fn add_point(&self, point: PointCreate) -> Result<PointId, PointError> {
        debug!("Sending request");
        self.inner.create(point).await.map_err(|e| match e {
            FrameworkError::DuplicateKey(name) => PointError::AlreadyExists(name),
            other => Self::map_error(other),
        })
    }

    /// Looks a point up by its (trimmed) name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Point>, PointError> {
        self.inner
            .lookup(name.trim().to_string())
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Point> for PointClient {
    type Error = PointError;

    fn inner(&self) -> &ResourceClient<Point> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(source) => match source.downcast::<PointError>() {
                Ok(point_error) => *point_error,
                Err(other) => PointError::ActorCommunicationError(other.to_string()),
            },
            other => PointError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl PointsDirectory for PointClient {
    async fn get_point(&self, id: PointId) -> Result<Option<PointSummary>, StoreError> {
        let point = self.inner.get(id).await.map_err(|e| {
            if e.is_transport() {
                StoreError::Unavailable(e.to_string())
            } else {
                StoreError::Rejected(e.to_string())
            }
        })?;
        Ok(point.as_ref().map(PointSummary::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::model::PointKind;

    #[tokio::test]
    async fn test_get_point_summarizes() {
        let mut mock = MockClient::<Point>::new();
        mock.expect_get(PointId(2)).return_ok(Some(Point {
            id: PointId(2),
            name: "Tarapoto".into(),
            city: "Tarapoto".into(),
            kind: PointKind::Agency,
        }));
        mock.expect_get(PointId(9)).return_ok(None);

        let points = PointClient::new(mock.client());
        let summary = points.get_point(PointId(2)).await.unwrap().unwrap();
        assert_eq!(summary.name, "Tarapoto");
        assert_eq!(points.get_point(PointId(9)).await.unwrap(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_duplicate_name_is_already_exists() {
        let mut mock = MockClient::<Point>::new();
        mock.expect_create()
            .return_err(FrameworkError::DuplicateKey("Lima".into()));

        let points = PointClient::new(mock.client());
        let result = points
            .add_point(PointCreate {
                name: "Lima".into(),
                city: "Lima".into(),
                kind: PointKind::Terminal,
            })
            .await;
        assert_eq!(result, Err(PointError::AlreadyExists("Lima".into())));
        mock.verify();
    }
}
