//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole application.
//!
//! The store logs every transition with structured fields (`entity_type`, `id`,
//! `state`, `size`), and the [`LoggingInterceptor`](crate::LoggingInterceptor) adds a
//! before/after line around each operation. Verbosity is controlled with `RUST_LOG`:
//!
//! ```bash
//! # Transitions only
//! RUST_LOG=info cargo run
//!
//! # Full payloads (`?fields`) and every find/flush
//! RUST_LOG=debug cargo run
//!
//! # Only the store
//! RUST_LOG=lifecycle_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` the walkthrough reads:
//!
//! ```text
//! INFO persist: Before operation operation=attach id=None
//! INFO persist: Attached entity_type="Member" id=1 size=1
//! INFO persist: After operation operation=attach id=None
//! ```

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says where a line comes from
        .compact()
        .try_init();
}
