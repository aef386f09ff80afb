//! Pure data structures shared by the actors and the tracking core.

pub mod event;
pub mod operator;
pub mod parcel;
pub mod point;
pub mod state;

pub use event::*;
pub use operator::*;
pub use parcel::*;
pub use point::*;
pub use state::*;
