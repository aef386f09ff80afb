//! Code lookup: one path for scanned and typed codes.

use crate::model::{Parcel, TrackingCode};
use crate::tracking::error::{store_failure, TrackingError};
use crate::tracking::store::ParcelStore;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Where a code came from. Only recorded in logs; both sources resolve identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSource {
    /// Decoded from a QR code or barcode by a camera.
    Scanned,
    /// Typed by an operator or a member of the public.
    Typed,
}

impl Display for CodeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeSource::Scanned => f.write_str("scanned"),
            CodeSource::Typed => f.write_str("typed"),
        }
    }
}

/// Maps a code to exactly one parcel.
///
/// Holds no state between calls: every well-formed code is looked up in live storage, so a
/// parcel registered a moment ago is found and repeated scans have no side effects.
pub struct LookupResolver<S> {
    store: Arc<S>,
}

impl<S> Clone for LookupResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: ParcelStore> LookupResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves a typed code.
    pub async fn resolve(&self, code: &str) -> Result<Parcel, TrackingError> {
        self.resolve_from(CodeSource::Typed, code).await
    }

    /// Trims and upper-cases `raw`, then looks it up by exact match.
    ///
    /// Malformed input is reported as [`TrackingError::NotFound`], the same as a
    /// well-formed code nobody registered.
    #[instrument(skip(self, raw), fields(%source))]
    pub async fn resolve_from(&self, source: CodeSource, raw: &str) -> Result<Parcel, TrackingError> {
        let Some(code) = TrackingCode::normalize(raw) else {
            debug!("Malformed code");
            return Err(TrackingError::NotFound);
        };

        match self
            .store
            .find_by_tracking_code(&code)
            .await
            .map_err(store_failure)?
        {
            Some(parcel) => {
                debug!(%code, parcel_id = %parcel.id, state = %parcel.state, "Resolved");
                Ok(parcel)
            }
            None => {
                debug!(%code, "No parcel for code");
                Err(TrackingError::NotFound)
            }
        }
    }
}
