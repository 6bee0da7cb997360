//! # Mock Store
//!
//! Utilities for testing entity clients without running a real store.
//!
//! [`MockClient`] hands out a genuine [`StoreClient`] whose requests are answered from a
//! queue of expectations instead of a [`LifecycleStore`](crate::LifecycleStore). Requests
//! must arrive in the order the expectations were registered.
//!
//! ```ignore
//! let mut mock = MockClient::<Member>::new();
//! mock.expect_attach().return_ok(EntityId::new(1));
//! mock.expect_find(EntityId::new(1)).return_ok(Member::new("A"));
//!
//! let client = MemberClient::new(mock.client());
//! // Use client in tests...
//! mock.verify(); // Ensures all expectations were met
//! ```
//!
//! The mock only answers; it never changes the state of the handles it receives. A
//! request that does not match the next expectation is answered by dropping its reply
//! channel (the caller sees [`LifecycleError::StoreDropped`]) and is reported by
//! [`MockClient::verify`].

use crate::entity::{Entity, PersistentEntity};
use crate::error::LifecycleError;
use crate::message::StoreRequest;
use crate::state::EntityId;
use crate::StoreClient;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: PersistentEntity> {
    Attach {
        response: Result<EntityId, LifecycleError>,
    },
    Flush {
        response: Result<usize, LifecycleError>,
    },
    Find {
        id: EntityId,
        response: Result<T, LifecycleError>,
    },
    Detach {
        response: Result<(), LifecycleError>,
    },
    Merge {
        response: Result<Entity<T>, LifecycleError>,
    },
    Remove {
        response: Result<(), LifecycleError>,
    },
    Contains {
        response: Result<bool, LifecycleError>,
    },
    Clear {
        response: Result<usize, LifecycleError>,
    },
}

impl<T: PersistentEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Attach { .. } => "attach",
            Expectation::Flush { .. } => "flush",
            Expectation::Find { .. } => "find",
            Expectation::Detach { .. } => "detach",
            Expectation::Merge { .. } => "merge",
            Expectation::Remove { .. } => "remove",
            Expectation::Contains { .. } => "contains",
            Expectation::Clear { .. } => "clear",
        }
    }
}

fn request_name<T: PersistentEntity>(request: &StoreRequest<T>) -> &'static str {
    match request {
        StoreRequest::Attach { .. } => "attach",
        StoreRequest::Flush { .. } => "flush",
        StoreRequest::Find { .. } => "find",
        StoreRequest::Detach { .. } => "detach",
        StoreRequest::Merge { .. } => "merge",
        StoreRequest::Remove { .. } => "remove",
        StoreRequest::Contains { .. } => "contains",
        StoreRequest::Clear { .. } => "clear",
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: PersistentEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .expect("mock expectation queue poisoned")
        .push_back(expectation);
}

/// A mock store with expectation tracking for fluent testing.
pub struct MockClient<T: PersistentEntity> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: PersistentEntity> MockClient<T> {
    /// Creates a new mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let unexpected = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectation queue poisoned")
                    .pop_front();

                match (request, expectation) {
                    (StoreRequest::Attach { respond_to, .. }, Some(Expectation::Attach { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Flush { respond_to }, Some(Expectation::Flush { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Find { id, respond_to }, Some(Expectation::Find { id: expected, response })) => {
                        if id == expected {
                            let _ = respond_to.send(response);
                        } else {
                            unexpected
                                .lock()
                                .expect("mock mismatch log poisoned")
                                .push(format!("find called with id {} (expected {})", id, expected));
                        }
                    }
                    (StoreRequest::Detach { respond_to, .. }, Some(Expectation::Detach { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Merge { respond_to, .. }, Some(Expectation::Merge { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Remove { respond_to, .. }, Some(Expectation::Remove { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Contains { respond_to, .. }, Some(Expectation::Contains { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Clear { respond_to }, Some(Expectation::Clear { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let expected = expectation.as_ref().map_or("nothing", Expectation::name);
                        unexpected
                            .lock()
                            .expect("mock mismatch log poisoned")
                            .push(format!("unexpected {} request (expected {})", request_name(&request), expected));
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_attach(&mut self) -> ExpectationBuilder<T, EntityId> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Attach { response })
    }

    pub fn expect_flush(&mut self) -> ExpectationBuilder<T, usize> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Flush { response })
    }

    pub fn expect_find(&mut self, id: EntityId) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Find { id, response })
    }

    pub fn expect_detach(&mut self) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Detach { response })
    }

    pub fn expect_merge(&mut self) -> ExpectationBuilder<T, Entity<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Merge { response })
    }

    pub fn expect_remove(&mut self) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Remove { response })
    }

    pub fn expect_contains(&mut self) -> ExpectationBuilder<T, bool> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Contains { response })
    }

    pub fn expect_clear(&mut self) -> ExpectationBuilder<T, usize> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Clear { response })
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().expect("mock mismatch log poisoned");
        if !mismatches.is_empty() {
            panic!("Expectation mismatch: {}", mismatches.join("; "));
        }
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectation queue poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: PersistentEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that registers the response for one expected request.
pub struct ExpectationBuilder<T: PersistentEntity, R> {
    expectations: Queue<T>,
    build: Box<dyn FnOnce(Result<R, LifecycleError>) -> Expectation<T>>,
}

impl<T: PersistentEntity, R: 'static> ExpectationBuilder<T, R> {
    fn new(
        expectations: &Queue<T>,
        build: impl FnOnce(Result<R, LifecycleError>) -> Expectation<T> + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        push(&self.expectations, (self.build)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: LifecycleError) {
        push(&self.expectations, (self.build)(Err(error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    struct NoteError;

    impl PersistentEntity for Note {
        type Error = NoteError;
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_attach().return_ok(EntityId::new(9));
        mock.expect_find(EntityId::new(9)).return_ok(Note { text: "hi".into() });
        mock.expect_remove().return_err(LifecycleError::NotFound(EntityId::new(9)));

        let client = mock.client();
        let note = Entity::new(Note { text: "hi".into() });

        assert_eq!(client.attach(&note).await.unwrap(), EntityId::new(9));
        assert_eq!(client.find(EntityId::new(9)).await.unwrap().text, "hi");
        assert!(client.remove(&note).await.unwrap_err().is_not_found());

        mock.verify();
    }

    #[tokio::test]
    async fn test_contains_and_clear_expectations() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_contains().return_ok(true);
        mock.expect_clear().return_ok(2);

        let client = mock.client();
        let note = Entity::new(Note { text: "hi".into() });

        assert!(client.contains(&note).await.unwrap());
        assert_eq!(client.clear().await.unwrap(), 2);

        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_reported() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_flush().return_ok(0);

        let client = mock.client();
        assert!(matches!(client.clear().await, Err(LifecycleError::StoreDropped)));

        let panic = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()))
            .expect_err("verify must fail");
        let message = panic.downcast_ref::<String>().cloned().unwrap_or_default();
        assert_eq!(message, "Expectation mismatch: unexpected clear request (expected flush)");
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unmet_expectations() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_flush().return_ok(0);
        mock.verify();
    }
}
