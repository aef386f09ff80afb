//! # Encomienda Tracking
//!
//! Parcel (encomienda) lifecycle tracking for a passenger-transport courier service.
//!
//! A parcel moves through one fixed sequence of states:
//!
//! ```text
//! REGISTERED -> IN_WAREHOUSE -> IN_TRANSIT -> ARRIVED_AT_DESTINATION -> RETRIEVED
//! ```
//!
//! Operators at warehouse stations scan or type the parcel's tracking code and advance it
//! one step at a time. Only the destination point may hand a parcel over, and handover
//! needs proof of the recipient's identity. Anyone holding the tracking code can read the
//! public tracking view.
//!
//! ## Module Tour
//!
//! ### 1. The Core ([`tracking`])
//! Lookup resolver, lifecycle engine and tracking projector, written against two storage
//! traits ([`ParcelStore`](tracking::ParcelStore), [`PointsDirectory`](tracking::PointsDirectory))
//! rather than any concrete backend.
//!
//! ### 2. The Engine Room ([`framework`])
//! A generic `ResourceActor<T>` that owns entities and processes requests one at a time.
//! Sequential processing is what makes the parcel store's compare-and-append atomic.
//!
//! ### 3. The Actors ([`parcel_actor`], [`point_actor`]) and their [`clients`]
//! The in-process backends. [`ParcelStoreClient`](clients::ParcelStoreClient) and
//! [`PointClient`](clients::PointClient) implement the core's storage traits.
//!
//! ### 4. The Orchestrator ([`runtime`])
//! [`TrackingSystem`](runtime::TrackingSystem) spawns and wires everything; configuration
//! and logging setup live next to it.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod framework;
pub mod model;
pub mod parcel_actor;
pub mod point_actor;
pub mod runtime;
pub mod tracking;
