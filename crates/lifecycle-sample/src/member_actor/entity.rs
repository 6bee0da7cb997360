//! PersistentEntity trait implementation for the Member domain type.
//!
//! A member must have a non-blank name to be persisted or merged back.

use super::MemberError;
use crate::model::Member;
use lifecycle_framework::PersistentEntity;

fn validate(member: &Member) -> Result<(), MemberError> {
    if member.name.trim().is_empty() {
        return Err(MemberError::ValidationError("name must not be blank".into()));
    }
    Ok(())
}

impl PersistentEntity for Member {
    type Error = MemberError;

    fn on_persist(&mut self) -> Result<(), MemberError> {
        validate(self)
    }

    fn on_merge(&mut self) -> Result<(), MemberError> {
        validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle_framework::{Entity, EntityState, LifecycleError, LifecycleStore};

    #[test]
    fn test_blank_name_cannot_be_persisted() {
        let mut store = LifecycleStore::new();
        let member = Entity::new(Member::new("   "));

        let err = store.attach(&member).unwrap_err();
        assert_eq!(
            MemberError::from(err),
            MemberError::ValidationError("name must not be blank".into())
        );
        assert_eq!(member.state(), EntityState::Transient);
    }

    #[test]
    fn test_blank_name_cannot_be_merged() {
        let mut store = LifecycleStore::new();
        let member = Entity::new(Member::new("짱구"));
        let id = store.attach(&member).unwrap();
        store.detach(&member).unwrap();
        member.modify(|m| m.set_name(""));

        assert!(matches!(store.merge(&member), Err(LifecycleError::Entity(_))));
        assert_eq!(store.find(id).unwrap().name, "짱구");
        assert!(store.get_managed(id).is_none());
        assert_eq!(member.state(), EntityState::Detached);
    }
}
