//! # Generic Messages
//!
//! Request types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// Resources managed here are never updated in place or deleted through the generic
/// API; the only mutation path is a custom [`ActorEntity::Action`].
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new resource.
/// - **Get**: Fetches the current state of the resource by ID.
/// - **Lookup**: Fetches the resource whose natural key matches exactly.
/// - **Action**: Executes a custom [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Lookup {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
