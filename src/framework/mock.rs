//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of a running actor. Use it to test code that sits *around*
//! a client (the lookup resolver, the lifecycle engine) and, above all, to inject failures
//! that a healthy in-process actor never produces.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//! | **Use Case** | Transport failures, call counting | Lifecycle semantics, races |
//!
//! ## Simulating an unreachable store
//!
//! ```rust,ignore
//! let mut mock = MockClient::<ParcelRecord>::new();
//! mock.expect_lookup(code).return_err(FrameworkError::ActorClosed);
//!
//! let store = ParcelStoreClient::new(mock.client());
//! let result = LookupResolver::new(Arc::new(store)).resolve("ENC-2025-0001").await;
//! assert!(matches!(result, Err(TrackingError::TransportFailure(_))));
//! mock.verify();
//! ```
//!
//! ## Channel-level helpers
//!
//! [`create_mock_client`] returns a client plus the raw receiver, so a test can inspect the
//! exact request (e.g. the `CompareAndAppend` payload) before answering it by hand.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Lookup {
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<(Option<String>, Expectation<T>)>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next expectation
/// (wrong kind, or wrong id/key when one was given) panics the mock task, which the caller
/// observes as `FrameworkError::ActorDropped`; `verify` then reports the leftovers.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = expectations_clone.lock().unwrap().pop_front();
                let (target, expectation) = match next {
                    Some(next) => next,
                    None => panic!("Unexpected request: no expectations left"),
                };

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Expectation::Get { response }) => {
                        assert_target(&target, &id.to_string());
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Lookup { key, respond_to },
                        Expectation::Lookup { response },
                    ) => {
                        assert_target(&target, &key.to_string());
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create {
                            params: _,
                            respond_to,
                        },
                        Expectation::Create { response },
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action {
                            id,
                            action: _,
                            respond_to,
                        },
                        Expectation::Action { response },
                    ) => {
                        assert_target(&target, &id.to_string());
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(Some(id.to_string()), self.expectations.clone(), |response| {
            Expectation::Get { response }
        })
    }

    /// Expects a `lookup` operation.
    pub fn expect_lookup(&mut self, key: T::Key) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(Some(key.to_string()), self.expectations.clone(), |response| {
            Expectation::Lookup { response }
        })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(None, self.expectations.clone(), |response| {
            Expectation::Create { response }
        })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(Some(id.to_string()), self.expectations.clone(), |response| {
            Expectation::Action { response }
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

fn assert_target(expected: &Option<String>, actual: &str) {
    if let Some(expected) = expected {
        assert_eq!(expected, actual, "request addressed to an unexpected resource");
    }
}

/// Builder that records the response for one expectation.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    target: Option<String>,
    expectations: Expectations<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        target: Option<String>,
        expectations: Expectations<T>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> Self {
        Self {
            target,
            expectations,
            wrap,
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back((self.target, (self.wrap)(response)));
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls requests with the `expect_*` helpers below, asserts
/// on their payloads and answers through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Lookup request
pub async fn expect_lookup<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Key,
    tokio::sync::oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Lookup { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Badge {
        id: u32,
        holder: String,
    }

    #[derive(Debug)]
    struct BadgeCreate {
        holder: String,
    }

    #[derive(Debug)]
    enum BadgeAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("Badge error")]
    struct BadgeError;

    #[async_trait]
    impl ActorEntity for Badge {
        type Id = u32;
        type Key = String;
        type Create = BadgeCreate;
        type Action = BadgeAction;
        type ActionResult = ();
        type Context = ();
        type Error = BadgeError;

        fn from_create_params(id: u32, params: BadgeCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                holder: params.holder,
            })
        }

        fn key(&self) -> String {
            self.holder.clone()
        }

        async fn handle_action(&mut self, action: BadgeAction, _ctx: &()) -> Result<(), Self::Error> {
            match action {}
        }
    }

    #[tokio::test]
    async fn test_channel_mock_sees_lookup_key() {
        let (client, mut receiver) = create_mock_client::<Badge>(10);

        let lookup_task = tokio::spawn(async move { client.lookup("ana".to_string()).await });

        let (key, responder) = expect_lookup(&mut receiver)
            .await
            .expect("Expected Lookup request");
        assert_eq!(key, "ana");
        responder
            .send(Ok(Some(Badge {
                id: 7,
                holder: "ana".into(),
            })))
            .unwrap();

        let found = lookup_task.await.unwrap().unwrap().unwrap();
        assert_eq!(found.id, 7);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Badge>::new();
        mock.expect_create().return_ok(1);
        mock.expect_lookup("ana".to_string()).return_ok(None);
        mock.expect_get(1).return_err(FrameworkError::ActorClosed);

        let client = mock.client();

        let id = client
            .create(BadgeCreate {
                holder: "ana".into(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert!(client.lookup("ana".to_string()).await.unwrap().is_none());
        assert!(matches!(
            client.get(1).await,
            Err(FrameworkError::ActorClosed)
        ));

        mock.verify();
    }
}
