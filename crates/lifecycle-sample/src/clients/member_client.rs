use crate::member_actor::MemberError;
use crate::model::Member;
use async_trait::async_trait;
use lifecycle_framework::{Entity, EntityClient, EntityId, LifecycleError, StoreClient};
use tracing::{debug, info, instrument};

/// Client for the Member store.
///
/// The store client is passed in through [`MemberClient::new`]; nothing is looked up
/// from a global container.
#[derive(Clone)]
pub struct MemberClient {
    inner: StoreClient<Member>,
}

impl MemberClient {
    pub fn new(inner: StoreClient<Member>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Member> for MemberClient {
    type Error = MemberError;

    fn inner(&self) -> &StoreClient<Member> {
        &self.inner
    }

    fn map_error(e: LifecycleError) -> Self::Error {
        MemberError::from(e)
    }
}

impl MemberClient {
    /// Creates a member and makes it persistent.
    ///
    /// Returns the managed instance together with its new identity.
    #[instrument(skip(self))]
    pub async fn create_member(&self, name: &str) -> Result<(Entity<Member>, EntityId), MemberError> {
        debug!("Sending request");
        let member = Entity::new(Member::new(name));
        let id = self.persist_member(&member).await?;
        Ok((member, id))
    }

    /// Makes an existing transient member persistent.
    #[instrument(skip(self, member))]
    pub async fn persist_member(&self, member: &Entity<Member>) -> Result<EntityId, MemberError> {
        let id = self.inner.attach(member).await?;
        info!(%id, name = %member.fields().name, "Member created");
        Ok(id)
    }

    /// Renames a member and flushes, so the new name is durable if the member is managed.
    #[instrument(skip(self, member))]
    pub async fn rename_member(&self, member: &Entity<Member>, name: &str) -> Result<usize, MemberError> {
        debug!(id = ?member.id(), "Sending request");
        member.modify(|m| m.set_name(name));
        Ok(self.inner.flush().await?)
    }

    #[instrument(skip(self, member))]
    pub async fn detach_member(&self, member: &Entity<Member>) -> Result<(), MemberError> {
        debug!(id = ?member.id(), "Sending request");
        Ok(self.inner.detach(member).await?)
    }

    /// Returns the managed copy holding the detached member's current values.
    #[instrument(skip(self, member))]
    pub async fn merge_member(&self, member: &Entity<Member>) -> Result<Entity<Member>, MemberError> {
        debug!(id = ?member.id(), "Sending request");
        Ok(self.inner.merge(member).await?)
    }

    #[instrument(skip(self, member))]
    pub async fn delete_member(&self, member: &Entity<Member>) -> Result<(), MemberError> {
        debug!(id = ?member.id(), "Sending request");
        self.inner.remove(member).await?;
        info!(id = ?member.id(), name = %member.fields().name, "Member deleted");
        Ok(())
    }
}
