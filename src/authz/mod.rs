//! Authorization module - permission resolver and ownership guards
//!
//! This module implements the permission engine with support for:
//! - Role default permission sets per resource kind
//! - Group overrides, unioned ("all" scope) or replacing ("specific" scope)
//! - Creator-or-admin ownership gates for selected kinds and actions
//! - Per-kind convenience guards used by the rest of the application

pub mod checklists;
pub mod documents;
mod guard;
mod policy;
pub mod projects;
mod resolver;
pub mod sites;

pub use guard::{authorize, is_admin, AccessDecision, DenialReason, GuardRequest};
pub use policy::{policy_for, ResourcePolicy};
pub use resolver::{resolve, resolve_all, resolve_traced, Resolution};

/// Role id that passes every ownership gate.
pub const ADMIN_ROLE_ID: &str = roles::ADMIN;

/// Well-known role ids
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const PROJECT_MANAGER: &str = "project_manager";
    pub const USER: &str = "user";
    pub const VIEWER: &str = "viewer";
}
