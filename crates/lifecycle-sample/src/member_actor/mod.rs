//! # Member Store
//!
//! This module wires the Member entity into a lifecycle store served by an actor.
//!
//! ## Structure
//!
//! - [`entity`] - [`PersistentEntity`](lifecycle_framework::PersistentEntity) implementation for [`Member`]
//! - [`error`] - [`MemberError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use lifecycle_sample::lifecycle::SystemConfig;
//! use lifecycle_sample::member_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = member_actor::new(&SystemConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     let (member, id) = client.create_member("Alice").await?;
//!     assert_eq!(member.id(), Some(id));
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MemberClient;
use crate::lifecycle::SystemConfig;
use crate::model::Member;
use lifecycle_framework::{LifecycleStore, LoggingInterceptor, StoreActor};

/// Creates a new Member store actor and its client.
///
/// Every operation is logged by a [`LoggingInterceptor`].
pub fn new(config: &SystemConfig) -> (StoreActor<Member>, MemberClient) {
    let store = LifecycleStore::new().with_interceptor(LoggingInterceptor);
    let (actor, generic_client) = StoreActor::new(config.channel_capacity, store);
    let client = MemberClient::new(generic_client);

    (actor, client)
}
