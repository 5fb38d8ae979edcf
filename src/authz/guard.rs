use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::policy::policy_for;
use super::resolver::resolve_traced;
use super::ADMIN_ROLE_ID;
use crate::models::{Action, EntityType, GroupPermissionOverride, Role, User};

/// Why a guard said no.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No user record was supplied.
    UnknownUser,
    /// The action is ownership-gated and the user is neither creator nor admin.
    NotOwnerOrAdmin,
    /// The user's role does not exist and no override granted the bit.
    UnknownRole,
    /// Role defaults and overrides leave the bit off.
    MissingPermission,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::UnknownUser => "unknown_user",
            DenialReason::NotOwnerOrAdmin => "not_owner_or_admin",
            DenialReason::UnknownRole => "unknown_role",
            DenialReason::MissingPermission => "missing_permission",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccessDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenialReason>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Request for one guarded action on one resource.
#[derive(Debug, Clone, Copy)]
pub struct GuardRequest<'a> {
    pub entity_type: EntityType,
    pub action: Action,
    pub resource_id: Option<&'a str>,
    /// Creator of the resource; required for ownership-gated actions.
    pub creator_id: Option<Uuid>,
}

impl<'a> GuardRequest<'a> {
    pub fn new(entity_type: EntityType, action: Action) -> Self {
        Self {
            entity_type,
            action,
            resource_id: None,
            creator_id: None,
        }
    }

    pub fn on(mut self, resource_id: &'a str) -> Self {
        self.resource_id = Some(resource_id);
        self
    }

    pub fn created_by(mut self, creator_id: Option<Uuid>) -> Self {
        self.creator_id = creator_id;
        self
    }
}

pub fn is_admin(user: &User) -> bool {
    user.role_id == ADMIN_ROLE_ID
}

/// Applies the kind's ownership policy, then the resolver.
///
/// Never fails: a missing user, a failed ownership check, and a missing bit
/// all come back as a denial.
pub fn authorize(
    user: Option<&User>,
    request: GuardRequest<'_>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> AccessDecision {
    let Some(user) = user else {
        return AccessDecision::deny(DenialReason::UnknownUser);
    };

    let policy = policy_for(request.entity_type);
    if policy.requires_ownership(request.action) {
        let is_creator = request.creator_id == Some(user.id);
        if !is_admin(user) && !is_creator {
            tracing::debug!(
                user_id = %user.id,
                entity_type = %request.entity_type,
                action = %request.action,
                resource_id = ?request.resource_id,
                "ownership gate denied"
            );
            return AccessDecision::deny(DenialReason::NotOwnerOrAdmin);
        }
    }

    let resolution = resolve_traced(user, request.entity_type, request.resource_id, overrides, roles);
    if resolution.effective.get(request.action) {
        return AccessDecision::allow();
    }

    tracing::debug!(
        user_id = %user.id,
        entity_type = %request.entity_type,
        action = %request.action,
        resource_id = ?request.resource_id,
        "permission denied"
    );

    if resolution.role_found {
        AccessDecision::deny(DenialReason::MissingPermission)
    } else {
        AccessDecision::deny(DenialReason::UnknownRole)
    }
}

/// Boolean form of [`authorize`] used by the per-kind helpers.
pub(crate) fn allowed(
    user: Option<&User>,
    request: GuardRequest<'_>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    authorize(user, request, overrides, roles).allowed
}
