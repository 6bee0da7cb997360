//! # Store Messages
//!
//! The requests a [`StoreClient`](crate::StoreClient) sends to a
//! [`StoreActor`](crate::StoreActor). There is one variant per store operation; each
//! carries a one-shot channel for the reply.

use crate::entity::{Entity, PersistentEntity};
use crate::error::LifecycleError;
use crate::state::EntityId;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, LifecycleError>>;

#[derive(Debug)]
pub enum StoreRequest<T: PersistentEntity> {
    Attach {
        entity: Entity<T>,
        respond_to: Response<EntityId>,
    },
    Flush {
        respond_to: Response<usize>,
    },
    Find {
        id: EntityId,
        respond_to: Response<T>,
    },
    Detach {
        entity: Entity<T>,
        respond_to: Response<()>,
    },
    Merge {
        entity: Entity<T>,
        respond_to: Response<Entity<T>>,
    },
    Remove {
        entity: Entity<T>,
        respond_to: Response<()>,
    },
    Contains {
        entity: Entity<T>,
        respond_to: Response<bool>,
    },
    Clear {
        respond_to: Response<usize>,
    },
}
