//! # Store Actor
//!
//! The `StoreActor` owns a [`LifecycleStore`] and serves it to any number of
//! [`StoreClient`]s over a channel. Requests are processed one at a time, so the store
//! needs no lock even when many tasks share it.
//!
//! # Usage Pattern
//!
//! 1.  **Create**: Build the store (with its interceptors) and call `StoreActor::new()`
//!     to get the `actor` (server) and `client` (interface).
//! 2.  **Run**: Spawn the actor's run loop in a background task.
//! 3.  **Use**: Clone the client wherever the store is needed.
//!
//! ```rust
//! use lifecycle_framework::{Entity, LifecycleStore, PersistentEntity, StoreActor};
//!
//! #[derive(Clone, Debug)]
//! struct Note { text: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("note error")]
//! struct NoteError;
//!
//! impl PersistentEntity for Note {
//!     type Error = NoteError;
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(10, LifecycleStore::<Note>::new());
//!     tokio::spawn(actor.run());
//!
//!     let note = Entity::new(Note { text: "hello".into() });
//!     let id = client.attach(&note).await.unwrap();
//!     assert_eq!(client.find(id).await.unwrap().text, "hello");
//! }
//! ```

use crate::client::StoreClient;
use crate::entity::PersistentEntity;
use crate::message::StoreRequest;
use crate::store::LifecycleStore;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub struct StoreActor<T: PersistentEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: LifecycleStore<T>,
}

impl<T: PersistentEntity> StoreActor<T> {
    /// Creates a new `StoreActor` around `store` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `store` - The store to serve, with its interceptors already wired.
    pub fn new(buffer_size: usize, store: LifecycleStore<T>) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, store };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop, processing requests until every client is dropped.
    pub async fn run(mut self) {
        let entity_type = LifecycleStore::<T>::entity_type();
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            // A dropped receiver only means the caller stopped waiting.
            match msg {
                StoreRequest::Attach { entity, respond_to } => {
                    let _ = respond_to.send(self.store.attach(&entity));
                }
                StoreRequest::Flush { respond_to } => {
                    let _ = respond_to.send(self.store.flush());
                }
                StoreRequest::Find { id, respond_to } => {
                    let _ = respond_to.send(self.store.find(id));
                }
                StoreRequest::Detach { entity, respond_to } => {
                    let _ = respond_to.send(self.store.detach(&entity));
                }
                StoreRequest::Merge { entity, respond_to } => {
                    let _ = respond_to.send(self.store.merge(&entity));
                }
                StoreRequest::Remove { entity, respond_to } => {
                    let _ = respond_to.send(self.store.remove(&entity));
                }
                StoreRequest::Contains { entity, respond_to } => {
                    let contains = self.store.contains(&entity);
                    debug!(entity_type, contains, "Contains");
                    let _ = respond_to.send(Ok(contains));
                }
                StoreRequest::Clear { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.clear()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
