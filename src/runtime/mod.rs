//! Runtime orchestration and ambient setup.
//!
//! - [`TrackingSystem`] starts the actors, wires the tracking service and shuts it all down
//! - [`TrackingConfig`] is loaded from TOML
//! - [`setup_tracing`] initializes logging from the `[logging]` section

pub mod config;
pub mod tracing;
pub mod tracking_system;

pub use self::config::*;
pub use self::tracing::setup_tracing;
pub use self::tracking_system::*;
