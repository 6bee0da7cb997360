//! # Member Lifecycle Demo
//!
//! Walks one member through the entity lifecycle and prints what the store held
//! after every step:
//!
//! 1.  Setting up the [`MemberSystem`].
//! 2.  Running the [`walkthrough`] (attach, flush, detach, merge, remove).
//! 3.  Shutting the system down.
//!
//! Exits non-zero on any unexpected error.
//!
//! ```bash
//! RUST_LOG=info cargo run -p lifecycle-sample
//! ```

use lifecycle_framework::tracing::setup_tracing;
use lifecycle_sample::lifecycle::walkthrough::{self, WalkthroughNames};
use lifecycle_sample::lifecycle::{MemberSystem, SystemConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting member lifecycle walkthrough");

    let system = MemberSystem::new(SystemConfig::from_env());
    let names = WalkthroughNames::default();

    let result = walkthrough::run(&system.member_client, &names).await;

    // Shut down before reporting so the store's final log line comes first.
    system.shutdown().await?;

    match result {
        Ok(report) => {
            println!("1. Transient:  name={}", names.initial);
            println!("2. Persistent: id={} stored={}", report.id, report.after_attach.name);
            println!("3. Flushed:    stored={}", report.after_flush.name);
            println!(
                "4. Detached:   local={} stored={}",
                report.detached_local.name, report.after_detached_flush.name
            );
            println!("5. Merged:     stored={}", report.after_merge.name);
            println!("6. Removed:    {}", report.after_remove);
            info!("Walkthrough completed successfully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Walkthrough failed");
            Err(e.to_string())
        }
    }
}
