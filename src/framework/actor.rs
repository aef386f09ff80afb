//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the entities of one
//! resource type. It is the "Server" side of the Actor Model: messages are processed one at
//! a time, so every request observes and produces a consistent store.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// **Concurrency Model**:
/// Each actor processes its own messages *sequentially* in a loop, so the `store` needs no
/// `Mutex` or `RwLock`. Two clients racing on the same entity are ordered by the mailbox;
/// an `Action` either runs to completion or not at all from the point of view of every
/// other request.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// # Implementation Details
///
/// The actor maintains a `HashMap` (`store`) mapping IDs to entities, a unique `index`
/// from natural key to ID, and a `u32` counter (`next_id`) for ID generation.
///
/// * **Create**: builds the entity, runs `on_create`, refuses a key already indexed,
///   then stores and indexes it.
/// * **Get** / **Lookup**: return a clone of the entity, or `None`.
/// * **Action**: runs `handle_action` with mutable access and returns its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    index: HashMap<T::Key, T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            index: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "ParcelRecord" instead of the full path)
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    let key = item.key();
                    if self.index.contains_key(&key) {
                        warn!(entity_type, %key, "Duplicate key");
                        let _ = respond_to.send(Err(FrameworkError::DuplicateKey(key.to_string())));
                        continue;
                    }

                    self.next_id += 1;
                    self.index.insert(key, id.clone());
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Lookup { key, respond_to } => {
                    let item = self
                        .index
                        .get(&key)
                        .and_then(|id| self.store.get(id))
                        .cloned();
                    let found = item.is_some();
                    debug!(entity_type, %key, found, "Lookup");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
