//! # Lifecycle Walkthrough
//!
//! Drives one member through every transition and records what the durable view
//! showed after each step:
//!
//! 1. create (transient) → attach → find
//! 2. rename → flush → find (the change lands)
//! 3. detach → rename → flush → find (the change does not land)
//! 4. merge → find (the detached value lands through the managed copy)
//! 5. remove → find (not found)

use crate::clients::MemberClient;
use crate::member_actor::MemberError;
use crate::model::Member;
use lifecycle_framework::{Entity, EntityClient, EntityId, EntityState};
use tracing::{info, info_span, Instrument};

/// The three names the walkthrough assigns, in order.
#[derive(Debug, Clone)]
pub struct WalkthroughNames {
    pub initial: String,
    pub renamed: String,
    pub renamed_while_detached: String,
}

impl Default for WalkthroughNames {
    fn default() -> Self {
        Self {
            initial: "A".into(),
            renamed: "B".into(),
            renamed_while_detached: "C".into(),
        }
    }
}

/// What the durable view (and the handles) showed at each step.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughReport {
    pub id: EntityId,
    pub after_attach: Member,
    pub after_flush: Member,
    pub after_detached_flush: Member,
    /// The detached instance's own fields when the detached flush happened.
    pub detached_local: Member,
    pub after_merge: Member,
    pub merged_copy_is_distinct: bool,
    pub detached_state_after_merge: EntityState,
    pub after_remove: MemberError,
}

async fn find(client: &MemberClient, id: EntityId, step: &str) -> Result<Member, MemberError> {
    let member = client.find(id).await?;
    info!(step, %id, name = %member.name, "Stored value");
    Ok(member)
}

/// Runs the walkthrough against `client`.
///
/// Fails on the first unexpected error, including a record that survives removal.
pub async fn run(client: &MemberClient, names: &WalkthroughNames) -> Result<WalkthroughReport, MemberError> {
    // 1. Transient -> Persistent
    let (member, id, after_attach) = async {
        let member = Entity::new(Member::new(names.initial.as_str()));
        info!(id = ?member.id(), state = %member.state(), "Transient");
        let id = client.persist_member(&member).await?;
        info!(%id, state = %member.state(), "Persistent");
        let stored = find(client, id, "attach").await?;
        Ok::<_, MemberError>((member, id, stored))
    }
    .instrument(info_span!("persist"))
    .await?;

    // 2. Dirty write-through on flush
    let after_flush = async {
        client.rename_member(&member, &names.renamed).await?;
        find(client, id, "flush").await
    }
    .instrument(info_span!("flush"))
    .await?;

    // 3. Detached mutations stay local
    let (after_detached_flush, detached_local) = async {
        client.detach_member(&member).await?;
        info!(%id, state = %member.state(), "Detached");
        client.rename_member(&member, &names.renamed_while_detached).await?;
        let stored = find(client, id, "detached flush").await?;
        info!(local = %member.fields().name, stored = %stored.name, "Local vs stored");
        Ok::<_, MemberError>((stored, member.fields()))
    }
    .instrument(info_span!("detach"))
    .await?;

    // 4. Merge back into a managed copy
    let (managed, after_merge) = async {
        let managed = client.merge_member(&member).await?;
        info!(%id, state = %managed.state(), "Merged");
        let stored = find(client, id, "merge").await?;
        Ok::<_, MemberError>((managed, stored))
    }
    .instrument(info_span!("merge"))
    .await?;

    // 5. Remove
    let after_remove = async {
        client.delete_member(&managed).await?;
        info!(%id, state = %managed.state(), "Removed");
        match client.find(id).await {
            Err(e @ MemberError::NotFound(_)) => {
                info!(%id, error = %e, "Lookup after remove");
                Ok::<_, MemberError>(e)
            }
            Err(e) => Err(e),
            Ok(survivor) => Err(MemberError::InvalidState(format!(
                "member {} still stored as {:?} after removal",
                id, survivor
            ))),
        }
    }
    .instrument(info_span!("remove"))
    .await?;

    Ok(WalkthroughReport {
        id,
        after_attach,
        after_flush,
        after_detached_flush,
        detached_local,
        after_merge,
        merged_copy_is_distinct: !managed.same_instance(&member),
        detached_state_after_merge: member.state(),
        after_remove,
    })
}
