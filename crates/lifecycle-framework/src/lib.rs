//! # Lifecycle Framework
//!
//! A small persistence context: it tracks in-memory entity instances through the
//! **transient → persistent → detached → removed** lifecycle and keeps a durable view
//! of their field values keyed by identity.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`PersistentEntity`], [`Entity`]) - your record type and the
//!    shared handle client code mutates
//! 2. **Store Layer** ([`LifecycleStore`]) - the state machine and the durable view
//! 3. **Service Layer** ([`StoreActor`], [`StoreClient`]) - one store shared by many tasks
//! 4. **Cross-cutting** ([`Interceptor`]) - hooks around every operation
//!
//! ## The State Machine
//!
//! ```text
//! Transient --attach--> Persistent --detach--> Detached --merge--> Persistent (copy)
//!                       Persistent --remove--> Removed (terminal)
//!                       Persistent --flush---> Persistent
//! ```
//!
//! Mutations made through [`Entity::modify`] reach the durable view only when the
//! instance is persistent and the store is flushed. Operations attempted from any
//! other state fail with [`LifecycleError::InvalidState`]; reading an identity with no
//! record fails with [`LifecycleError::NotFound`].
//!
//! ## Example
//!
//! ```rust
//! use lifecycle_framework::{Entity, LifecycleStore, PersistentEntity};
//!
//! #[derive(Clone, Debug)]
//! struct Member { name: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("member error")]
//! struct MemberError;
//!
//! impl PersistentEntity for Member {
//!     type Error = MemberError;
//! }
//!
//! let mut store = LifecycleStore::new();
//! let member = Entity::new(Member { name: "A".into() });
//!
//! let id = store.attach(&member).unwrap();
//! member.modify(|m| m.name = "B".into());
//! store.flush().unwrap();
//! assert_eq!(store.find(id).unwrap().name, "B");
//!
//! store.detach(&member).unwrap();
//! member.modify(|m| m.name = "C".into());
//! store.flush().unwrap();
//! assert_eq!(store.find(id).unwrap().name, "B");
//!
//! let managed = store.merge(&member).unwrap();
//! assert_eq!(store.find(id).unwrap().name, "C");
//!
//! store.remove(&managed).unwrap();
//! assert!(store.find(id).unwrap_err().is_not_found());
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for a `StoreClient` driven by expectations, for testing
//! entity clients without running a store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod interceptor;
pub mod message;
pub mod mock;
pub mod operation;
pub mod state;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::EntityClient;
pub use entity::{Entity, PersistentEntity};
pub use error::LifecycleError;
pub use interceptor::{Interceptor, InterceptorChain, Invocation, LoggingInterceptor};
pub use message::{Response, StoreRequest};
pub use operation::Operation;
pub use state::{EntityId, EntityState};
pub use store::LifecycleStore;
