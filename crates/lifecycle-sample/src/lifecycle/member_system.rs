use super::SystemConfig;
use crate::clients::MemberClient;
use tracing::{error, info};

/// The runtime orchestrator for the member store.
///
/// `MemberSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store actor
/// - **Dependency Wiring**: Building the store with its interceptors and handing the
///   client to whoever needs it
///
/// # Example
///
/// ```ignore
/// let system = MemberSystem::new(SystemConfig::from_env());
///
/// let (member, id) = system.member_client.create_member("Alice").await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct MemberSystem {
    /// Client for interacting with the Member store
    pub member_client: MemberClient,

    /// Task handle of the running store actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl MemberSystem {
    /// Creates the store actor and spawns it in its own Tokio task.
    pub fn new(config: SystemConfig) -> Self {
        info!(?config, "Starting member system");
        let (actor, member_client) = crate::member_actor::new(&config);
        let handle = tokio::spawn(actor.run());

        Self {
            member_client,
            handle,
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the store's channel; the actor then drains and exits.
    /// Clones of the client held elsewhere keep the store alive until they are dropped.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.member_client);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
