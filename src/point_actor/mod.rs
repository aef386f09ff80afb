//! # Point Actor
//!
//! The in-process points directory: terminals, warehouses and agencies, unique by name.
//! Nothing in the tracking core writes here; points are seeded at startup.

pub mod entity;
pub mod error;

pub use entity::PointAction;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Point;

/// Creates a new Point actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Point>, ResourceClient<Point>) {
    ResourceActor::new(buffer_size)
}
