//! # Identity & State
//!
//! The two small value types every other module talks in: the identity a store
//! assigns to a record, and the lifecycle state of an in-memory instance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a durable record.
///
/// Assigned by [`LifecycleStore::attach`](crate::LifecycleStore::attach) from a
/// monotonically increasing counter that starts at `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an in-memory instance sits in its lifecycle.
///
/// ```text
/// Transient --attach--> Persistent --detach--> Detached --merge--> Persistent (copy)
///                       Persistent --remove--> Removed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityState {
    /// Created by client code, unknown to any store. No identity.
    Transient,
    /// Tracked by a store. Local mutations reach the durable view on flush.
    Persistent,
    /// Identity retained, no longer tracked. Mutations stay local.
    Detached,
    /// Durable record deleted. Terminal.
    Removed,
}

impl EntityState {
    /// Whether an instance in this state carries an identity.
    pub fn has_identity(&self) -> bool {
        !matches!(self, EntityState::Transient)
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityState::Transient => "transient",
            EntityState::Persistent => "persistent",
            EntityState::Detached => "detached",
            EntityState::Removed => "removed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transient_lacks_identity() {
        assert!(!EntityState::Transient.has_identity());
        assert!(EntityState::Persistent.has_identity());
        assert!(EntityState::Detached.has_identity());
        assert!(EntityState::Removed.has_identity());
    }

    #[test]
    fn test_id_displays_as_number() {
        assert_eq!(EntityId::new(7).to_string(), "7");
        assert_eq!(EntityId::from(3).value(), 3);
    }
}
