//! # Store Client
//!
//! The `StoreClient` is the clonable, async façade over a running
//! [`StoreActor`](crate::StoreActor). Each method sends one request and awaits the
//! reply, so it returns exactly what the underlying
//! [`LifecycleStore`](crate::LifecycleStore) returned, plus
//! [`LifecycleError::StoreClosed`] / [`LifecycleError::StoreDropped`] when the actor
//! is gone.

use crate::entity::{Entity, PersistentEntity};
use crate::error::LifecycleError;
use crate::message::StoreRequest;
use crate::state::EntityId;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `StoreActor`.
pub struct StoreClient<T: PersistentEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: PersistentEntity> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: PersistentEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, LifecycleError>>) -> StoreRequest<T>,
    ) -> Result<R, LifecycleError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| LifecycleError::StoreClosed)?;
        response.await.map_err(|_| LifecycleError::StoreDropped)?
    }

    pub async fn attach(&self, entity: &Entity<T>) -> Result<EntityId, LifecycleError> {
        let entity = entity.clone();
        self.request(|respond_to| StoreRequest::Attach { entity, respond_to })
            .await
    }

    pub async fn flush(&self) -> Result<usize, LifecycleError> {
        self.request(|respond_to| StoreRequest::Flush { respond_to })
            .await
    }

    pub async fn find(&self, id: EntityId) -> Result<T, LifecycleError> {
        self.request(|respond_to| StoreRequest::Find { id, respond_to })
            .await
    }

    pub async fn detach(&self, entity: &Entity<T>) -> Result<(), LifecycleError> {
        let entity = entity.clone();
        self.request(|respond_to| StoreRequest::Detach { entity, respond_to })
            .await
    }

    pub async fn merge(&self, entity: &Entity<T>) -> Result<Entity<T>, LifecycleError> {
        let entity = entity.clone();
        self.request(|respond_to| StoreRequest::Merge { entity, respond_to })
            .await
    }

    pub async fn remove(&self, entity: &Entity<T>) -> Result<(), LifecycleError> {
        let entity = entity.clone();
        self.request(|respond_to| StoreRequest::Remove { entity, respond_to })
            .await
    }

    pub async fn contains(&self, entity: &Entity<T>) -> Result<bool, LifecycleError> {
        let entity = entity.clone();
        self.request(|respond_to| StoreRequest::Contains { entity, respond_to })
            .await
    }

    pub async fn clear(&self) -> Result<usize, LifecycleError> {
        self.request(|respond_to| StoreRequest::Clear { respond_to })
            .await
    }
}
