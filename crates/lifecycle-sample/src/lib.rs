//! # Member Lifecycle Sample
//!
//! This library exposes the sample's modules for the demo binary and integration tests.
//!
//! - **[model]**: the [`Member`](model::Member) record.
//! - **[member_actor]**: its lifecycle callbacks, error type and store factory.
//! - **[clients]**: [`MemberClient`](clients::MemberClient), the domain-facing API.
//! - **[lifecycle]**: orchestration, configuration and the walkthrough.

pub mod clients;
pub mod lifecycle;
pub mod member_actor;
pub mod model;
