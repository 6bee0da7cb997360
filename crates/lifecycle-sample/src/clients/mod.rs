//! Type-safe wrappers around [`StoreClient`](lifecycle_framework::StoreClient).

pub mod member_client;

pub use member_client::*;
