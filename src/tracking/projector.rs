//! Public, read-only tracking view.
//!
//! The view is assembled in two halves: [`TrackingProjector::project`] reads the parcel with
//! its events in one snapshot plus the point summaries, and [`build_view`] turns them into a
//! [`TrackingView`] without touching anything else. Same inputs, same view.

use crate::model::{
    Contact, Parcel, ParcelRecord, ParcelState, PointId, PointSummary, TrackingCode,
    TransitionEvent,
};
use crate::tracking::error::{store_failure, TrackingError};
use crate::tracking::store::{ParcelStore, PointsDirectory};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of trailing phone characters shown publicly.
const VISIBLE_PHONE_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingView {
    pub tracking_code: TrackingCode,
    pub state: ParcelState,
    pub state_label: String,
    pub description: String,
    pub weight_kg: f64,
    pub origin: PointSummary,
    pub destination: PointSummary,
    pub sender: ContactView,
    pub recipient: ContactView,
    pub registered_at: DateTime<Utc>,
    /// Oldest first, in lifecycle order.
    pub history: Vec<HistoryEntry>,
    /// One step per lifecycle state.
    pub progress: Vec<ProgressStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub from: ParcelState,
    pub to: ParcelState,
    pub label: String,
    pub at: DateTime<Utc>,
    pub point: Option<PointSummary>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressStep {
    pub state: ParcelState,
    pub label: String,
    pub reached: bool,
    pub current: bool,
    /// Time the state was entered, when an event (or the registration) records it.
    pub reached_at: Option<DateTime<Utc>>,
}

/// Contact details safe to show to anyone holding the tracking code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    pub name: String,
    pub phone: String,
}

impl From<&Contact> for ContactView {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: mask_phone(&contact.phone),
        }
    }
}

/// Replaces all but the last three characters with `*`.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.trim().chars().collect();
    let hidden = chars.len().saturating_sub(VISIBLE_PHONE_CHARS);
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < hidden { '*' } else { *c })
        .collect()
}

pub struct TrackingProjector<S, D> {
    store: Arc<S>,
    points: Arc<D>,
}

impl<S, D> Clone for TrackingProjector<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            points: self.points.clone(),
        }
    }
}

impl<S: ParcelStore, D: PointsDirectory> TrackingProjector<S, D> {
    pub fn new(store: Arc<S>, points: Arc<D>) -> Self {
        Self { store, points }
    }

    /// Re-reads the parcel together with its events, then the referenced points, and
    /// builds the view.
    ///
    /// `parcel` only identifies the parcel; its state may be stale by the time this runs,
    /// so state, history and progress all come from the one fresh snapshot.
    #[instrument(skip(self, parcel), fields(code = %parcel.tracking_code))]
    pub async fn project(&self, parcel: &Parcel) -> Result<TrackingView, TrackingError> {
        let ParcelRecord { parcel, events } = self
            .store
            .snapshot(parcel.id)
            .await
            .map_err(store_failure)?
            .ok_or(TrackingError::NotFound)?;

        let mut ids: Vec<PointId> = vec![parcel.origin, parcel.destination];
        ids.extend(events.iter().filter_map(|event| event.point));

        let mut points = BTreeMap::new();
        for id in ids {
            if points.contains_key(&id) {
                continue;
            }
            let summary = self
                .points
                .get_point(id)
                .await
                .map_err(store_failure)?
                .unwrap_or_else(|| PointSummary::unknown(id));
            points.insert(id, summary);
        }

        debug!(events = events.len(), points = points.len(), "Projecting");
        Ok(build_view(&parcel, &events, &points))
    }
}

/// Builds the view from already-fetched data.
///
/// Points missing from `points` are shown by id.
pub fn build_view(
    parcel: &Parcel,
    events: &[TransitionEvent],
    points: &BTreeMap<PointId, PointSummary>,
) -> TrackingView {
    let summary = |id: PointId| {
        points
            .get(&id)
            .cloned()
            .unwrap_or_else(|| PointSummary::unknown(id))
    };

    // Lifecycle order wins over timestamps, which may be skewed between stations.
    let mut ordered: Vec<&TransitionEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.to.ordinal());

    let history = ordered
        .iter()
        .map(|event| HistoryEntry {
            from: event.from,
            to: event.to,
            label: event.to.label().to_string(),
            at: event.at,
            point: event.point.map(summary),
            note: event.note.clone(),
        })
        .collect();

    let current = parcel.state.ordinal();
    let progress = ParcelState::SEQUENCE
        .iter()
        .map(|&state| {
            let reached_at = if state == ParcelState::Registered {
                Some(parcel.registered_at)
            } else {
                ordered
                    .iter()
                    .find(|event| event.to == state)
                    .map(|event| event.at)
            };
            ProgressStep {
                state,
                label: state.label().to_string(),
                reached: state.ordinal() <= current,
                current: state.ordinal() == current,
                reached_at,
            }
        })
        .collect();

    TrackingView {
        tracking_code: parcel.tracking_code.clone(),
        state: parcel.state,
        state_label: parcel.state.label().to_string(),
        description: parcel.description.clone(),
        weight_kg: parcel.weight_kg,
        origin: summary(parcel.origin),
        destination: summary(parcel.destination),
        sender: ContactView::from(&parcel.sender),
        recipient: ContactView::from(&parcel.recipient),
        registered_at: parcel.registered_at,
        history,
        progress,
    }
}
