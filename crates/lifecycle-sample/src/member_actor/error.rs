//! Error types for the Member store.

use lifecycle_framework::LifecycleError;
use thiserror::Error;

/// Errors that can occur during member operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MemberError {
    /// No stored member has the requested identity.
    #[error("Member not found: {0}")]
    NotFound(String),

    /// The member instance is in the wrong lifecycle state for the operation.
    #[error("Invalid member state: {0}")]
    InvalidState(String),

    /// The member data provided is invalid.
    #[error("Member validation error: {0}")]
    ValidationError(String),

    /// An interceptor refused the operation.
    #[error("Member operation rejected: {0}")]
    Rejected(String),

    /// An error occurred while communicating with the store.
    #[error("Store communication error: {0}")]
    StoreCommunicationError(String),
}

impl From<String> for MemberError {
    fn from(msg: String) -> Self {
        MemberError::StoreCommunicationError(msg)
    }
}

impl From<LifecycleError> for MemberError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::NotFound(id) => MemberError::NotFound(id.to_string()),
            LifecycleError::InvalidState { .. } | LifecycleError::NotManaged { .. } => {
                MemberError::InvalidState(e.to_string())
            }
            LifecycleError::Rejected { .. } => MemberError::Rejected(e.to_string()),
            LifecycleError::Entity(inner) => match inner.downcast::<MemberError>() {
                Ok(member_error) => *member_error,
                Err(other) => MemberError::ValidationError(other.to_string()),
            },
            LifecycleError::StoreClosed | LifecycleError::StoreDropped => {
                MemberError::StoreCommunicationError(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle_framework::{EntityId, EntityState, Operation};

    #[test]
    fn test_lifecycle_errors_map_to_member_errors() {
        assert_eq!(
            MemberError::from(LifecycleError::NotFound(EntityId::new(1))),
            MemberError::NotFound("1".into())
        );
        assert_eq!(
            MemberError::from(LifecycleError::InvalidState {
                operation: Operation::Remove,
                state: EntityState::Detached,
            }),
            MemberError::InvalidState("Cannot remove an entity in the detached state".into())
        );
        assert!(matches!(
            MemberError::from(LifecycleError::StoreClosed),
            MemberError::StoreCommunicationError(_)
        ));
    }
}
