//! Role- and group-based permission engine.
//!
//! [`authz::resolve`] combines a user's role defaults with the overrides of
//! the groups they belong to; the per-kind guards in [`authz`] add
//! creator-or-admin gates on top. Everything operates on caller-supplied
//! snapshots and never mutates them.

pub mod app;
pub mod authz;
pub mod config;
pub mod docs;
pub mod errors;
pub mod events;
pub mod models;
pub mod naming;
pub mod routes;
pub mod snapshot;

// Re-export commonly used items for tests
pub use app::{create_app, AppState};
pub use authz::{resolve, resolve_all};
pub use snapshot::PermissionSnapshot;
