//! # PersistentEntity Trait & Entity Handle
//!
//! The `PersistentEntity` trait is the contract a record type (e.g. `Member`) implements
//! to be managed by a [`LifecycleStore`](crate::LifecycleStore). It names the error type
//! the record's own callbacks fail with and provides lifecycle callbacks
//! (`on_persist`, `on_merge`, `on_remove`) that default to doing nothing.
//!
//! [`Entity<T>`] is the in-memory instance client code holds. It is a shared handle:
//! the store keeps a clone of every handle it manages, so when client code mutates a
//! persistent instance the store sees the new field values on the next flush, exactly
//! as client code does.
//!
//! # Provided Methods (Hooks)
//! You do **not** need to implement the callbacks unless you want to validate or react
//! to a transition. The default implementation does nothing (`Ok(())`).

use crate::state::{EntityId, EntityState};
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Trait that any record type must implement to be managed by a `LifecycleStore`.
///
/// # Design Note: Synchronous Callbacks
/// The store itself is synchronous; the async service in [`crate::actor`] only owns one
/// and forwards requests to it. Callbacks therefore run inline with the operation and
/// can abort it by returning an error.
pub trait PersistentEntity: Clone + Debug + Send + Sync + 'static {
    /// The error type for this entity's callbacks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called by `attach` before an identity is assigned.
    /// Returning an error leaves the instance transient and writes nothing.
    fn on_persist(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called by `merge` on the field values about to become the managed copy.
    fn on_merge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called by `remove` before the durable record is deleted.
    fn on_remove(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Identifies the store that issued an instance's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoreToken(u64);

impl StoreToken {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) id: Option<EntityId>,
    pub(crate) state: EntityState,
    /// Set once by the store that assigns the identity; kept through detach.
    pub(crate) owner: Option<StoreToken>,
    pub(crate) fields: T,
}

/// An in-memory entity instance.
///
/// Cloning the handle does not copy the instance; both clones observe the same
/// identity, state and fields. Use [`Entity::same_instance`] to compare instances.
#[derive(Debug)]
pub struct Entity<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Clone for Entity<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Clone> Entity<T> {
    /// Creates a transient instance with no identity.
    pub fn new(fields: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                id: None,
                state: EntityState::Transient,
                owner: None,
                fields,
            })),
        }
    }

    /// A persistent instance already owned by `owner`.
    pub(crate) fn managed(id: EntityId, owner: StoreToken, fields: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                id: Some(id),
                state: EntityState::Persistent,
                owner: Some(owner),
                fields,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        // A panic inside `modify` leaves the fields as the closure left them.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The identity, absent while transient.
    pub fn id(&self) -> Option<EntityId> {
        self.lock().id
    }

    pub fn state(&self) -> EntityState {
        self.lock().state
    }

    /// A snapshot of the current in-memory field values.
    pub fn fields(&self) -> T {
        self.lock().fields.clone()
    }

    /// Mutates the in-memory field values.
    ///
    /// Allowed in every state. Whether the change ever reaches the durable view is
    /// decided by the store: only persistent instances are written on flush.
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock().fields)
    }

    /// Whether both handles refer to the same in-memory instance.
    pub fn same_instance(&self, other: &Entity<T>) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    pub(crate) fn identity_and_state(&self) -> (Option<EntityId>, EntityState) {
        let slot = self.lock();
        (slot.id, slot.state)
    }

    pub(crate) fn set_state(&self, state: EntityState) {
        self.lock().state = state;
    }

    /// Runs `f` with the instance locked; `modify` through other handles waits for it.
    pub(crate) fn locked<R>(&self, f: impl FnOnce(&mut Slot<T>) -> R) -> R {
        f(&mut self.lock())
    }

    pub(crate) fn replace_fields(&self, fields: T) {
        self.lock().fields = fields;
    }
}
