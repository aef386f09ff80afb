//! Generic actor framework for resource management.
//!
//! Building blocks for type-safe actors that own a collection of entities and serve
//! create, read, natural-key lookup and custom actions over message passing.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the entities and processes requests in order
//! - [`ResourceClient`] - Typed, cloneable handle for sending requests
//! - [`ActorClient`] - Default read operations for domain-specific clients
//! - [`FrameworkError`] - Plumbing errors (closed actor, duplicate key, entity error)
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
