//! # EntityClient Trait
//!
//! Provides a common interface for entity-specific clients, adding default `find` and
//! `flush` methods built on top of a generic `StoreClient`.
use crate::{EntityId, LifecycleError, PersistentEntity, StoreClient};
use async_trait::async_trait;

/// Trait for entity-specific clients to inherit the read and flush operations.
///
/// # Example
///
/// ```rust
/// use lifecycle_framework::{EntityClient, EntityId, LifecycleError, PersistentEntity, StoreClient};
///
/// #[derive(Clone, Debug)]
/// struct Note { text: String }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct NoteError(String);
///
/// impl From<String> for NoteError {
///     fn from(s: String) -> Self { NoteError(s) }
/// }
///
/// impl PersistentEntity for Note {
///     type Error = NoteError;
/// }
///
/// struct NoteClient {
///     inner: StoreClient<Note>,
/// }
///
/// impl EntityClient<Note> for NoteClient {
///     type Error = NoteError;
///
///     fn inner(&self) -> &StoreClient<Note> {
///         &self.inner
///     }
///
///     fn map_error(e: LifecycleError) -> Self::Error {
///         NoteError(e.to_string())
///     }
/// }
///
/// async fn usage(client: NoteClient) {
///     // find() and flush() are provided automatically!
///     let _ = client.find(EntityId::new(1)).await;
///     let _ = client.flush().await;
/// }
/// ```
#[async_trait]
pub trait EntityClient<T: PersistentEntity>: Send + Sync {
    /// The entity-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map lifecycle errors to the entity-specific error type.
    fn map_error(e: LifecycleError) -> Self::Error;

    /// Read the durable field values for an identity.
    #[tracing::instrument(skip(self))]
    async fn find(&self, id: EntityId) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(id).await.map_err(Self::map_error)
    }

    /// Write every managed instance's fields to the durable view.
    #[tracing::instrument(skip(self))]
    async fn flush(&self) -> Result<usize, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().flush().await.map_err(Self::map_error)
    }
}
