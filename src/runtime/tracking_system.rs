use crate::clients::{ParcelStoreClient, PointClient};
use crate::runtime::config::TrackingConfig;
use crate::tracking::TrackingService;
use crate::{parcel_actor, point_actor};
use std::sync::Arc;
use tracing::{error, info};

/// The in-process tracking deployment: a parcel actor, a point actor, and the
/// [`TrackingService`] wired on top of them.
///
/// # Example
///
/// ```ignore
/// let system = TrackingSystem::new(&TrackingConfig::default());
///
/// let lima = system.points.add_point(lima).await?;
/// let parcel_id = system.parcel_store.register(registration).await?;
/// let view = system.service.track("ENC-2025-0001").await?;
///
/// system.shutdown().await?;
/// ```
pub struct TrackingSystem {
    /// Entry points for lookup, advance and public tracking.
    pub service: TrackingService<ParcelStoreClient, PointClient>,

    /// Registration and raw record access.
    pub parcel_store: Arc<ParcelStoreClient>,

    /// Seeding and lookup of operating points.
    pub points: Arc<PointClient>,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TrackingSystem {
    /// Spawns both actors and wires the service. Must be called inside a Tokio runtime.
    pub fn new(config: &TrackingConfig) -> Self {
        let (parcel_actor, parcel_client) = parcel_actor::new(config.store.buffer_size);
        let parcel_store = Arc::new(ParcelStoreClient::new(parcel_client));
        let parcel_handle = tokio::spawn(parcel_actor.run(()));

        let (point_actor, point_client) = point_actor::new(config.points.buffer_size);
        let points = Arc::new(PointClient::new(point_client));
        let point_handle = tokio::spawn(point_actor.run(()));

        let service = TrackingService::new(parcel_store.clone(), points.clone());
        info!(
            store_buffer = config.store.buffer_size,
            points_buffer = config.points.buffer_size,
            "Tracking system started"
        );

        Self {
            service,
            parcel_store,
            points,
            handles: vec![parcel_handle, point_handle],
        }
    }

    /// Drops every client this system holds and waits for the actors to drain.
    ///
    /// Clones of the service or clients handed out earlier keep the actors alive; drop
    /// them first or this waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down tracking system...");

        let Self {
            service,
            parcel_store,
            points,
            handles,
        } = self;
        drop(service);
        drop(parcel_store);
        drop(points);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Tracking system shutdown complete.");
        Ok(())
    }
}
