//! Shamba interaction: the HTTP collaborator layer.
//!
//! Implements the `shamba-core` backend seam against the system of record's
//! REST API and provides its runtime configuration.

mod client;
mod config;

pub use client::HttpBackend;
pub use config::BackendConfig;
