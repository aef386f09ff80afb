//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! These are the in-process implementations of the tracking core's storage traits.

pub mod parcel_client;
pub mod point_client;

pub use parcel_client::*;
pub use point_client::*;
