//! # Mock Store & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`EntityStoreClient<T>`] whose requests are answered
//! from a queue of expectations instead of an actor. Use it to test:
//!
//! - **Domain clients** (e.g. how a parcel client maps store errors), and
//! - **Entities with dependencies** (e.g. a payment whose `on_create` marks its parcel
//!   paid) by running the real actor with mocked clients in its context.
//!
//! Failures that are hard to produce with real actors, like a closed store, are one
//! `return_err` away.
//!
//! ```rust
//! use entity_store::mock::MockClient;
//! use entity_store::{StoreEntity, StoreError};
//! use async_trait::async_trait;
//! use std::convert::Infallible;
//!
//! #[derive(Clone, Debug)] struct Rider { id: u32, email: String }
//! #[derive(Debug)] struct RiderCreate;
//! #[derive(Debug, thiserror::Error)] #[error("rider error")] struct RiderError;
//!
//! #[async_trait]
//! impl StoreEntity for Rider {
//!     type Id = u32; type Create = RiderCreate; type Update = Infallible;
//!     type Action = Infallible; type ActionResult = ();
//!     type Context = (); type Error = RiderError;
//!     fn from_create_params(id: u32, _: RiderCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, email: String::new() })
//!     }
//!     async fn on_update(&mut self, u: Infallible, _: &()) -> Result<(), Self::Error> {
//!         match u {}
//!     }
//!     async fn handle_action(&mut self, a: Infallible, _: &()) -> Result<(), Self::Error> {
//!         match a {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Rider>::new();
//!     mock.expect_get(1).return_ok(Some(Rider { id: 1, email: "r@x.com".into() }));
//!     mock.expect_get(2).return_err(StoreError::Closed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap().unwrap().email, "r@x.com");
//!     assert!(matches!(client.get(2).await, Err(StoreError::Closed)));
//!     mock.verify();
//! }
//! ```

use crate::client::EntityStoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// An expected request and the canned reply for it.
enum Expectation<T: StoreEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn check_id<T: StoreEntity>(expected: &T::Id, actual: &T::Id) {
    if expected != actual {
        panic!("Mock expected id {expected}, got {actual}");
    }
}

/// A mock store answering requests in the order expectations were registered.
///
/// Requests that arrive out of order or with an unexpected id make the mock task panic,
/// which surfaces in the test as [`StoreError::Dropped`] and a failed `verify`.
pub struct MockClient<T: StoreEntity> {
    client: EntityStoreClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: want, response }),
                    ) => {
                        check_id::<T>(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        check_id::<T>(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) => {
                        check_id::<T>(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        check_id::<T>(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: EntityStoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn client(&self) -> EntityStoreClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Get {
            id,
            response,
        })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Create {
            response,
        })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Update { id, response }
        })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { id, response }
        })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Action { id, response }
        })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::List {
            response,
        })
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Completes an expectation with its reply.
pub struct ExpectationBuilder<T: StoreEntity, R> {
    expectations: Expectations<T>,
    build: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: StoreEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Expectations<T>,
        build: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            build: Box::new(build),
        }
    }

    /// Replies with a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Replies with an error.
    pub fn return_err(self, error: StoreError) {
        let expectation = (self.build)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Creates a client plus the raw receiver, for tests that inspect request payloads.
pub fn create_mock_client<T: StoreEntity>(
    buffer_size: usize,
) -> (EntityStoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (EntityStoreClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
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
    use crate::query::Query;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Courier {
        id: u32,
        email: String,
    }

    #[derive(Debug)]
    struct CourierCreate {
        email: String,
    }

    #[derive(Debug)]
    enum CourierAction {
        GoOffline,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("courier error")]
    struct CourierError;

    #[async_trait]
    impl StoreEntity for Courier {
        type Id = u32;
        type Create = CourierCreate;
        type Update = ();
        type Action = CourierAction;
        type ActionResult = bool;
        type Context = ();
        type Error = CourierError;

        fn from_create_params(id: u32, params: CourierCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                email: params.email,
            })
        }

        async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(
            &mut self,
            _action: CourierAction,
            _ctx: &(),
        ) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_sees_payloads() {
        let (client, mut receiver) = create_mock_client::<Courier>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CourierCreate {
                    email: "c@x.com".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.email, "c@x.com");
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_action_payload_is_forwarded() {
        let (client, mut receiver) = create_mock_client::<Courier>(10);
        let task =
            tokio::spawn(async move { client.perform_action(3, CourierAction::GoOffline).await });

        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, 3);
        assert!(matches!(action, CourierAction::GoOffline));
        responder.send(Ok(false)).unwrap();

        assert!(!task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_fluent_expectations_in_order() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_create().return_ok(1);
        mock.expect_list().return_ok(vec![Courier {
            id: 1,
            email: "c@x.com".to_string(),
        }]);
        mock.expect_delete(1).return_err(StoreError::NotFound("1".into()));

        let client = mock.client();
        let id = client
            .create(CourierCreate {
                email: "c@x.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let listed = client.list(Query::all()).await.unwrap();
        assert_eq!(listed.len(), 1);

        assert!(matches!(client.delete(1).await, Err(StoreError::NotFound(_))));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unmet_expectations() {
        let mut mock = MockClient::<Courier>::new();
        mock.expect_get(1).return_ok(None);
        mock.verify();
    }
}
