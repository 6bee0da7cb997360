//! Pure data structures implementing the [`PersistentEntity`](lifecycle_framework::PersistentEntity) trait.

pub mod member;

pub use member::*;
