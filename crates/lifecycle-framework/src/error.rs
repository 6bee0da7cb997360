//! # Lifecycle Errors
//!
//! This module defines the error type shared by the store, the service actor and
//! its clients. Centralizing it keeps error handling uniform whether a caller
//! talks to a [`LifecycleStore`](crate::LifecycleStore) directly or through a
//! [`StoreClient`](crate::StoreClient).

use crate::operation::Operation;
use crate::state::{EntityId, EntityState};

/// Errors returned by lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// The operation is not allowed from the instance's current state.
    #[error("Cannot {operation} an entity in the {state} state")]
    InvalidState {
        operation: Operation,
        state: EntityState,
    },
    /// No durable record exists for this identity.
    #[error("Entity not found: {0}")]
    NotFound(EntityId),
    /// The handle claims to be persistent but this store does not manage it.
    #[error("Entity {id} is not managed by this store (during {operation})")]
    NotManaged { operation: Operation, id: EntityId },
    /// An interceptor's pre-hook refused the operation.
    #[error("{operation} rejected by interceptor '{interceptor}'")]
    Rejected {
        operation: Operation,
        interceptor: String,
    },
    /// A lifecycle callback on the entity itself failed.
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
}

impl LifecycleError {
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, LifecycleError::InvalidState { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LifecycleError::NotFound(_))
    }
}

/// Shorthand for results carrying a [`LifecycleError`].
pub type Result<T, E = LifecycleError> = std::result::Result<T, E>;
