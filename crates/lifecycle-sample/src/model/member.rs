use serde::{Deserialize, Serialize};

/// A registered member, walked through the entity lifecycle by the demo.
///
/// # Lifecycle Framework
/// This struct implements the [`PersistentEntity`](lifecycle_framework::PersistentEntity)
/// trait, allowing it to be managed by a [`LifecycleStore`](lifecycle_framework::LifecycleStore).
/// It carries no identity of its own: the store assigns one on attach and keeps it on the
/// [`Entity`](lifecycle_framework::Entity) handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
}

impl Member {
    /// Creates a new Member instance.
    ///
    /// # Arguments
    /// * `name` - Member's display name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
