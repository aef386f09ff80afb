//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber. `RUST_LOG` wins over the configured
//! filter, so a deployment can be made chattier without touching the config file:
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! RUST_LOG=encomienda_tracking::tracking=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started`, `Created`, `Lookup`, `Action ok`, `Shutdown`,
//!   tagged with `entity_type`
//! - **Core operations**: `resolve_from`, `advance`, `project` spans carrying the tracking
//!   code, parcel id and operator
//! - **Outcomes**: named rejections at `info`/`warn`, storage failures at `error`
//!
//! With `RUST_LOG=info` and the compact format an advance reads:
//!
//! ```text
//! INFO advance{parcel_id=parcel_1 operator=op-lima}: Action ok entity_type="ParcelRecord" id=parcel_1
//! INFO advance{parcel_id=parcel_1 operator=op-lima}: Advanced code=ENC-2025-0001 from=REGISTERED to=IN_WAREHOUSE
//! ```

use crate::runtime::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    match config.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false) // entity_type carries the context instead
            .compact()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .init(),
    }
}
