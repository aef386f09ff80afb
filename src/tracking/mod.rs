//! Parcel lifecycle tracking.
//!
//! - [`resolver`] maps a scanned or typed code to one parcel.
//! - [`engine`] is the only writer: it advances a parcel one step at a time.
//! - [`projector`] builds the public tracking view.
//! - [`service`] bundles the three behind the entry points callers use.
//!
//! Storage is reached only through the traits in [`store`].

pub mod clock;
pub mod engine;
pub mod error;
pub mod projector;
pub mod resolver;
pub mod service;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use engine::{AdvanceOutcome, AdvanceRequest, LifecycleEngine};
pub use error::TrackingError;
pub use projector::{ContactView, HistoryEntry, ProgressStep, TrackingProjector, TrackingView};
pub use resolver::{CodeSource, LookupResolver};
pub use service::{ParcelSummary, TrackingService};
pub use store::{CasOutcome, ParcelStore, PointsDirectory, StoreError};
