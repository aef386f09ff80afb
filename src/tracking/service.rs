//! The three entry points the surrounding application calls: lookup, advance and track.

use crate::model::{Operator, Parcel, ParcelId, ParcelState, PointId, PointSummary, TrackingCode};
use crate::tracking::clock::Clock;
use crate::tracking::engine::{AdvanceOutcome, AdvanceRequest, LifecycleEngine};
use crate::tracking::error::{store_failure, TrackingError};
use crate::tracking::projector::{TrackingProjector, TrackingView};
use crate::tracking::resolver::{CodeSource, LookupResolver};
use crate::tracking::store::{ParcelStore, PointsDirectory};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// What an operator sees after scanning or typing a code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelSummary {
    pub id: ParcelId,
    pub tracking_code: TrackingCode,
    pub state: ParcelState,
    pub state_label: String,
    /// `None` once the parcel has been retrieved.
    pub next_state: Option<ParcelState>,
    pub origin: PointSummary,
    pub destination: PointSummary,
}

pub struct TrackingService<S, D> {
    points: Arc<D>,
    resolver: LookupResolver<S>,
    engine: LifecycleEngine<S, D>,
    projector: TrackingProjector<S, D>,
}

impl<S, D> Clone for TrackingService<S, D> {
    fn clone(&self) -> Self {
        Self {
            points: self.points.clone(),
            resolver: self.resolver.clone(),
            engine: self.engine.clone(),
            projector: self.projector.clone(),
        }
    }
}

impl<S: ParcelStore, D: PointsDirectory> TrackingService<S, D> {
    pub fn new(store: Arc<S>, points: Arc<D>) -> Self {
        Self {
            resolver: LookupResolver::new(store.clone()),
            engine: LifecycleEngine::new(store.clone(), points.clone()),
            projector: TrackingProjector::new(store, points.clone()),
            points,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.engine = self.engine.with_clock(clock);
        self
    }

    pub fn resolver(&self) -> &LookupResolver<S> {
        &self.resolver
    }

    pub fn engine(&self) -> &LifecycleEngine<S, D> {
        &self.engine
    }

    pub fn projector(&self) -> &TrackingProjector<S, D> {
        &self.projector
    }

    /// Operator-facing lookup for a scanned or typed code.
    #[instrument(skip(self, code), fields(%source))]
    pub async fn lookup(
        &self,
        source: CodeSource,
        code: &str,
    ) -> Result<ParcelSummary, TrackingError> {
        let parcel = self.resolver.resolve_from(source, code).await?;
        self.summarize(parcel).await
    }

    pub async fn advance(
        &self,
        parcel_id: ParcelId,
        operator: &Operator,
        request: AdvanceRequest,
    ) -> Result<AdvanceOutcome, TrackingError> {
        self.engine.advance(parcel_id, operator, request).await
    }

    /// Public tracking by code. No operator required.
    #[instrument(skip(self, code))]
    pub async fn track(&self, code: &str) -> Result<TrackingView, TrackingError> {
        let parcel = self.resolver.resolve(code).await?;
        self.projector.project(&parcel).await
    }

    async fn summarize(&self, parcel: Parcel) -> Result<ParcelSummary, TrackingError> {
        let origin = self.point_summary(parcel.origin).await?;
        let destination = self.point_summary(parcel.destination).await?;
        Ok(ParcelSummary {
            id: parcel.id,
            state_label: parcel.state.label().to_string(),
            next_state: parcel.state.next(),
            tracking_code: parcel.tracking_code,
            state: parcel.state,
            origin,
            destination,
        })
    }

    async fn point_summary(
        &self,
        id: PointId,
    ) -> Result<PointSummary, TrackingError> {
        Ok(self
            .points
            .get_point(id)
            .await
            .map_err(store_failure)?
            .unwrap_or_else(|| PointSummary::unknown(id)))
    }
}
