//! # System Lifecycle & Orchestration
//!
//! This module starts, wires and shuts down the member store, and hosts the demo
//! walkthrough that drives a member through every lifecycle state.
//!
//! ## Dependency Injection
//!
//! Nothing here is resolved from a container. [`MemberSystem::new`] builds the store
//! with its interceptors, hands it to the actor, and passes the resulting
//! `StoreClient` to [`MemberClient::new`](crate::clients::MemberClient::new) as a plain
//! constructor argument.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - Closes the sender side of the store channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - Wait for the store task to finish
//!
//! ## Configuration
//!
//! [`SystemConfig::from_env`] reads `LIFECYCLE_CHANNEL_CAPACITY`; log verbosity is set
//! with `RUST_LOG` (see [`lifecycle_framework::tracing`]).

pub mod config;
pub mod member_system;
pub mod walkthrough;

pub use config::*;
pub use member_system::*;
