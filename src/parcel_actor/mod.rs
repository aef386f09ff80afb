//! # Parcel Actor
//!
//! The in-process parcel store: one [`ResourceActor`] owning every [`ParcelRecord`],
//! indexed by tracking code.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`ParcelRecord`]
//! - [`error`] - [`ParcelError`]
//! - [`actions`] - [`ParcelAction::CompareAndAppend`], the only way a parcel changes
//!
//! ## Usage
//!
//! ```rust
//! use encomienda_tracking::clients::ParcelStoreClient;
//! use encomienda_tracking::parcel_actor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, generic_client) = parcel_actor::new(32);
//!     let store = ParcelStoreClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!     # drop(store);
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::ParcelRecord;

/// Creates a new Parcel actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<ParcelRecord>, ResourceClient<ParcelRecord>) {
    ResourceActor::new(buffer_size)
}
