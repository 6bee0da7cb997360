//! # Lifecycle Store
//!
//! The persistence context: a durable view of records keyed by [`EntityId`] plus the
//! set of instances currently managed (persistent).
//!
//! ## Operations
//!
//! * **attach**: transient → persistent. Runs `on_persist`, assigns the next identity,
//!   writes the record and starts tracking the instance.
//! * **flush**: copies the fields of every managed instance into the durable view.
//! * **find**: reads the durable view.
//! * **detach**: persistent → detached. The instance keeps its identity but later
//!   mutations are no longer flushed.
//! * **merge**: detached → a *managed copy* in the persistent state. The copy's fields
//!   (and the durable record) take the detached instance's current values. The detached
//!   instance itself is left untouched. If an instance with that identity is already
//!   managed, it is reused as the copy. Only instances whose identity this store issued
//!   can be merged.
//! * **remove**: persistent → removed (terminal). Runs `on_remove` and deletes the record.
//!
//! Every operation runs inside the store's [`InterceptorChain`].
//!
//! ## Concurrency
//! The store is a plain owned value: `&mut self` for every mutation and no internal
//! locking beyond each handle's own slot. To share one store across tasks, hand it
//! to a [`StoreActor`](crate::StoreActor).

use crate::entity::{Entity, PersistentEntity, StoreToken};
use crate::error::{LifecycleError, Result};
use crate::interceptor::{Interceptor, InterceptorChain, Invocation};
use crate::operation::Operation;
use crate::state::{EntityId, EntityState};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct LifecycleStore<T: PersistentEntity> {
    records: BTreeMap<EntityId, T>,
    managed: HashMap<EntityId, Entity<T>>,
    next_id: u64,
    token: StoreToken,
    interceptors: InterceptorChain,
}

impl<T: PersistentEntity> Default for LifecycleStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PersistentEntity> LifecycleStore<T> {
    /// Creates an empty store. The first attached entity gets identity `1`.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            managed: HashMap::new(),
            next_id: 1,
            token: StoreToken::next(),
            interceptors: InterceptorChain::new(),
        }
    }

    /// Adds an interceptor to the end of the chain.
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Replaces the whole interceptor chain.
    pub fn with_chain(mut self, chain: InterceptorChain) -> Self {
        self.interceptors = chain;
        self
    }

    /// Number of durable records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn entity_type() -> &'static str {
        // "Member" instead of "lifecycle_sample::model::member::Member"
        std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
    }

    fn intercepted<R>(
        &mut self,
        call: Invocation,
        operation: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        let chain = self.interceptors.clone();
        chain.run(call, || operation(self))
    }

    fn intercepted_read<R>(&self, call: Invocation, operation: impl FnOnce(&Self) -> Result<R>) -> Result<R> {
        self.interceptors.run(call, || operation(self))
    }

    /// Ensures `entity` is the persistent instance this store manages and returns its id.
    fn managed_id(&self, entity: &Entity<T>, operation: Operation) -> Result<EntityId> {
        let (id, state) = entity.identity_and_state();
        let id = match (state, id) {
            (EntityState::Persistent, Some(id)) => id,
            _ => return Err(LifecycleError::InvalidState { operation, state }),
        };
        match self.managed.get(&id) {
            Some(tracked) if tracked.same_instance(entity) => Ok(id),
            _ => Err(LifecycleError::NotManaged { operation, id }),
        }
    }

    /// Makes a transient instance persistent and returns its new identity.
    pub fn attach(&mut self, entity: &Entity<T>) -> Result<EntityId> {
        self.intercepted(Invocation::new(Operation::Attach, None), |store| {
            let entity_type = Self::entity_type();
            // Held from the state check to the assignment, so no edit made through
            // another handle is overwritten by the callback's copy.
            let id = entity.locked(|slot| {
                if slot.state != EntityState::Transient {
                    warn!(entity_type, state = %slot.state, "Attach refused");
                    return Err(LifecycleError::InvalidState {
                        operation: Operation::Attach,
                        state: slot.state,
                    });
                }

                let mut fields = slot.fields.clone();
                debug!(entity_type, ?fields, "Attach");
                if let Err(e) = fields.on_persist() {
                    warn!(entity_type, error = %e, "on_persist failed");
                    return Err(LifecycleError::Entity(Box::new(e)));
                }

                let id = EntityId::new(store.next_id);
                store.next_id += 1;
                store.records.insert(id, fields.clone());
                slot.id = Some(id);
                slot.state = EntityState::Persistent;
                slot.owner = Some(store.token);
                slot.fields = fields;
                Ok(id)
            })?;
            store.managed.insert(id, entity.clone());
            info!(entity_type, %id, size = store.records.len(), "Attached");
            Ok(id)
        })
    }

    /// Writes the current fields of every managed instance to the durable view.
    ///
    /// Returns how many records were written.
    pub fn flush(&mut self) -> Result<usize> {
        self.intercepted(Invocation::new(Operation::Flush, None), |store| {
            let mut written = 0;
            for (id, entity) in &store.managed {
                // Managed handles are always persistent; the check guards against a
                // handle whose state was changed by another store.
                if entity.state() != EntityState::Persistent {
                    continue;
                }
                store.records.insert(*id, entity.fields());
                written += 1;
            }
            debug!(entity_type = Self::entity_type(), written, "Flushed");
            Ok(written)
        })
    }

    /// Returns the durable field values for `id`.
    pub fn find(&self, id: EntityId) -> Result<T> {
        self.intercepted_read(Invocation::new(Operation::Find, Some(id)), |store| {
            let found = store.records.get(&id).cloned();
            debug!(entity_type = Self::entity_type(), %id, found = found.is_some(), "Find");
            found.ok_or(LifecycleError::NotFound(id))
        })
    }

    /// Stops tracking a persistent instance.
    pub fn detach(&mut self, entity: &Entity<T>) -> Result<()> {
        let id = entity.id();
        self.intercepted(Invocation::new(Operation::Detach, id), |store| {
            let id = store.managed_id(entity, Operation::Detach)?;
            store.managed.remove(&id);
            entity.set_state(EntityState::Detached);
            info!(entity_type = Self::entity_type(), %id, "Detached");
            Ok(())
        })
    }

    /// Reconciles a detached instance into a managed copy and returns the copy.
    pub fn merge(&mut self, entity: &Entity<T>) -> Result<Entity<T>> {
        let (id, state, owner, mut fields) =
            entity.locked(|slot| (slot.id, slot.state, slot.owner, slot.fields.clone()));
        self.intercepted(Invocation::new(Operation::Merge, id), |store| {
            let entity_type = Self::entity_type();
            let id = match (state, id) {
                (EntityState::Detached, Some(id)) => id,
                _ => {
                    warn!(entity_type, %state, "Merge refused");
                    return Err(LifecycleError::InvalidState {
                        operation: Operation::Merge,
                        state,
                    });
                }
            };
            if owner != Some(store.token) {
                warn!(entity_type, %id, "Merge of an identity issued by another store");
                return Err(LifecycleError::NotManaged {
                    operation: Operation::Merge,
                    id,
                });
            }
            if !store.records.contains_key(&id) {
                warn!(entity_type, %id, "Merge target gone");
                return Err(LifecycleError::NotFound(id));
            }

            debug!(entity_type, %id, ?fields, "Merge");
            if let Err(e) = fields.on_merge() {
                warn!(entity_type, %id, error = %e, "on_merge failed");
                return Err(LifecycleError::Entity(Box::new(e)));
            }

            store.records.insert(id, fields.clone());
            let copy = match store.managed.get(&id) {
                Some(existing) => {
                    existing.replace_fields(fields);
                    existing.clone()
                }
                None => {
                    let copy = Entity::managed(id, store.token, fields);
                    store.managed.insert(id, copy.clone());
                    copy
                }
            };
            info!(entity_type, %id, "Merged");
            Ok(copy)
        })
    }

    /// Deletes the record of a persistent instance. The instance becomes removed.
    pub fn remove(&mut self, entity: &Entity<T>) -> Result<()> {
        let id = entity.id();
        self.intercepted(Invocation::new(Operation::Remove, id), |store| {
            let entity_type = Self::entity_type();
            let id = store.managed_id(entity, Operation::Remove)?;
            if let Err(e) = entity.fields().on_remove() {
                warn!(entity_type, %id, error = %e, "on_remove failed");
                return Err(LifecycleError::Entity(Box::new(e)));
            }
            store.records.remove(&id);
            store.managed.remove(&id);
            entity.set_state(EntityState::Removed);
            info!(entity_type, %id, size = store.records.len(), "Removed");
            Ok(())
        })
    }

    /// Whether `entity` is the instance this store currently manages.
    pub fn contains(&self, entity: &Entity<T>) -> bool {
        self.managed_id(entity, Operation::Find).is_ok()
    }

    /// The managed instance for `id`, if any.
    pub fn get_managed(&self, id: EntityId) -> Option<Entity<T>> {
        self.managed.get(&id).cloned()
    }

    /// Detaches every managed instance. Returns how many were detached.
    pub fn clear(&mut self) -> usize {
        let detached = self.managed.len();
        for (_, entity) in self.managed.drain() {
            entity.set_state(EntityState::Detached);
        }
        info!(entity_type = Self::entity_type(), detached, "Cleared");
        detached
    }
}
