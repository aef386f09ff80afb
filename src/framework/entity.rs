//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every resource (parcels, points) implements to be
//! owned by a generic [`ResourceActor`](crate::framework::ResourceActor). It names the id and
//! natural-key types, the creation DTO, the custom action enum and the error type, and
//! provides the hooks the actor calls while processing requests.
//!
//! # Natural Keys
//! Besides the generated `Id`, each entity exposes a `Key` (a tracking code, a point name).
//! The actor keeps a unique index over it so that `Lookup` is an exact match and `Create`
//! can refuse duplicates. A key must never change after creation.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] defaults to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks may await other clients. The `Context` type is
/// injected into every hook through `run()`, not `new()` ("late binding").
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Unique natural key used for exact-match lookups.
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `CompareAndAppend`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients match on a single type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The natural key of this instance.
    fn key(&self) -> Self::Key;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    ///
    /// An `Err` must leave `self` untouched: the actor keeps whatever state the
    /// handler left behind.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
