use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    Parcel, ParcelId, ParcelRecord, ParcelRegistration, ParcelState, TrackingCode, TransitionEvent,
};
use crate::parcel_actor::{ParcelAction, ParcelActionResult, ParcelError};
use crate::tracking::{CasOutcome, ParcelStore, StoreError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the parcel actor. Implements [`ParcelStore`] for the tracking core.
#[derive(Clone)]
pub struct ParcelStoreClient {
    inner: ResourceClient<ParcelRecord>,
}

impl ParcelStoreClient {
    pub fn new(inner: ResourceClient<ParcelRecord>) -> Self {
        Self { inner }
    }

    /// Registers a parcel in `REGISTERED`. The tracking code is normalized first.
    #[instrument(skip(self, registration), fields(code = %registration.tracking_code))]
    pub async fn register(&self, registration: ParcelRegistration) -> Result<ParcelId, ParcelError> {
        debug!("Sending request");
        self.inner
            .create(registration)
            .await
            .map_err(|e| match e {
                FrameworkError::DuplicateKey(code) => ParcelError::DuplicateTrackingCode(code),
                other => Self::map_error(other),
            })
    }

    /// The full record: parcel plus audit trail.
    pub async fn record(&self, id: ParcelId) -> Result<Option<ParcelRecord>, ParcelError> {
        self.get(id).await
    }
}

#[async_trait]
impl ActorClient<ParcelRecord> for ParcelStoreClient {
    type Error = ParcelError;

    fn inner(&self) -> &ResourceClient<ParcelRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(source) => match source.downcast::<ParcelError>() {
                Ok(parcel_error) => *parcel_error,
                Err(other) => ParcelError::ActorCommunicationError(other.to_string()),
            },
            other => ParcelError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn store_error(e: FrameworkError) -> StoreError {
    if e.is_transport() {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Rejected(e.to_string())
    }
}

#[async_trait]
impl ParcelStore for ParcelStoreClient {
    #[instrument(skip(self))]
    async fn find_by_tracking_code(
        &self,
        code: &TrackingCode,
    ) -> Result<Option<Parcel>, StoreError> {
        debug!("Sending request");
        let record = self.inner.lookup(code.clone()).await.map_err(store_error)?;
        Ok(record.map(|record| record.parcel))
    }

    async fn find_by_id(&self, id: ParcelId) -> Result<Option<Parcel>, StoreError> {
        let record = self.inner.get(id).await.map_err(store_error)?;
        Ok(record.map(|record| record.parcel))
    }

    async fn snapshot(&self, id: ParcelId) -> Result<Option<ParcelRecord>, StoreError> {
        self.inner.get(id).await.map_err(store_error)
    }

    #[instrument(skip(self, event), fields(%id, %expected, to = %event.to))]
    async fn compare_and_append(
        &self,
        id: ParcelId,
        expected: ParcelState,
        event: TransitionEvent,
    ) -> Result<CasOutcome, StoreError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(id, ParcelAction::CompareAndAppend { expected, event })
            .await
            .map_err(store_error)?;

        match result {
            ParcelActionResult::Appended(record) => {
                let event = record.events.last().cloned().ok_or_else(|| {
                    StoreError::Rejected(format!("{id} appended without an event"))
                })?;
                Ok(CasOutcome::Applied {
                    parcel: record.parcel,
                    event,
                })
            }
            ParcelActionResult::StateMismatch { actual } => Ok(CasOutcome::Conflict { actual }),
        }
    }
}
