use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    Action, EntityType, GroupPermissionOverride, OverrideScope, PermissionSet, Role, User,
};

/// Outcome of a single resolution, with enough detail to explain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Resolution {
    pub effective: PermissionSet,
    /// The role default before any override was applied.
    pub base: PermissionSet,
    /// False when `user.role_id` matched no role in the snapshot.
    pub role_found: bool,
    /// Overrides that matched the user and resource, in application order.
    pub applied_overrides: Vec<Uuid>,
}

/// Effective permissions of `user` on `entity_type`, optionally narrowed to one instance.
///
/// Evaluation order:
/// 1. role default (all-false for an unknown role or a kind missing from the map)
/// 2. scope=all overrides of the user's groups, unioned per action
/// 3. scope=specific overrides targeting `entity_id`, assigned per action in
///    slice order (the last one mentioning an action wins)
pub fn resolve(
    user: &User,
    entity_type: EntityType,
    entity_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> PermissionSet {
    resolve_traced(user, entity_type, entity_id, overrides, roles).effective
}

/// Same as [`resolve`], also reporting the base set and the overrides that took part.
pub fn resolve_traced(
    user: &User,
    entity_type: EntityType,
    entity_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> Resolution {
    let role = roles.iter().find(|role| role.id == user.role_id);
    let base = role
        .map(|role| role.permissions_for(entity_type))
        .unwrap_or(PermissionSet::ALL_FALSE);

    let mut resolution = Resolution {
        effective: base,
        base,
        role_found: role.is_some(),
        applied_overrides: Vec::new(),
    };

    if role.is_none() {
        tracing::debug!(
            user_id = %user.id,
            role_id = %user.role_id,
            "unknown role, no base permissions"
        );
    }

    if user.group_ids.is_empty() {
        return resolution;
    }

    let applicable: Vec<&GroupPermissionOverride> = overrides
        .iter()
        .filter(|ov| ov.entity_type == entity_type && user.in_group(ov.group_id))
        .collect();

    if applicable.is_empty() {
        return resolution;
    }

    let all_scope: Vec<&GroupPermissionOverride> = applicable
        .iter()
        .copied()
        .filter(|ov| ov.scope == OverrideScope::All)
        .collect();
    let specific_scope: Vec<&GroupPermissionOverride> = applicable
        .iter()
        .copied()
        .filter(|ov| ov.scope == OverrideScope::Specific && ov.applies_to_entity(entity_id))
        .collect();

    let mut effective = base;

    // Union: an "all" override can only turn a bit on.
    for action in Action::ALL {
        for ov in &all_scope {
            if let Some(granted) = ov.permissions.get(action) {
                let current = effective.get(action);
                effective.set(action, current || granted);
            }
        }
    }

    // Replace: a "specific" override sets the bit outright, after the union.
    for action in Action::ALL {
        for ov in &specific_scope {
            if let Some(value) = ov.permissions.get(action) {
                effective.set(action, value);
            }
        }
    }

    resolution.applied_overrides = all_scope
        .iter()
        .chain(specific_scope.iter())
        .map(|ov| ov.id)
        .collect();
    resolution.effective = effective;

    tracing::debug!(
        user_id = %user.id,
        entity_type = %entity_type,
        entity_id = ?entity_id,
        applied = resolution.applied_overrides.len(),
        effective = ?effective,
        "group overrides applied"
    );

    resolution
}

/// Role defaults plus scope=all overrides for every known resource kind.
///
/// Specific-entity overrides never show up here; use [`resolve`] with an id for those.
pub fn resolve_all(
    user: &User,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> BTreeMap<EntityType, PermissionSet> {
    EntityType::ALL
        .into_iter()
        .map(|kind| (kind, resolve(user, kind, None, overrides, roles)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PartialPermissionSet;

    fn member_role() -> Role {
        Role::new("member", "Member")
            .with_permissions(EntityType::Documents, PermissionSet::READ_ONLY.with(Action::Update, true))
            .with_permissions(EntityType::Sites, PermissionSet::READ_ONLY)
    }

    #[test]
    fn user_without_groups_gets_role_default() {
        let user = User::new(Uuid::new_v4(), "member");
        let ov = GroupPermissionOverride::all(
            Uuid::new_v4(),
            EntityType::Documents,
            PartialPermissionSet::new().with(Action::Delete, true),
        );

        let result = resolve(&user, EntityType::Documents, None, &[ov], &[member_role()]);
        assert_eq!(result, member_role().permissions_for(EntityType::Documents));
    }

    #[test]
    fn unknown_role_resolves_to_nothing() {
        let user = User::new(Uuid::new_v4(), "ghost");
        let trace = resolve_traced(&user, EntityType::Sites, None, &[], &[member_role()]);

        assert_eq!(trace.effective, PermissionSet::ALL_FALSE);
        assert!(!trace.role_found);
    }

    #[test]
    fn unknown_role_still_receives_group_overrides() {
        let group = Uuid::new_v4();
        let user = User::new(Uuid::new_v4(), "ghost").with_groups([group]);
        let ov = GroupPermissionOverride::all(
            group,
            EntityType::Sites,
            PartialPermissionSet::new().with(Action::Read, true),
        );

        let result = resolve(&user, EntityType::Sites, None, &[ov], &[member_role()]);
        assert_eq!(result, PermissionSet::READ_ONLY);
    }

    #[test]
    fn all_scope_false_does_not_revoke() {
        let group = Uuid::new_v4();
        let user = User::new(Uuid::new_v4(), "member").with_groups([group]);
        let ov = GroupPermissionOverride::all(
            group,
            EntityType::Documents,
            PartialPermissionSet::new().with(Action::Update, false),
        );

        let result = resolve(&user, EntityType::Documents, None, &[ov], &[member_role()]);
        assert!(result.update);
    }

    #[test]
    fn overrides_of_other_groups_are_ignored() {
        let user = User::new(Uuid::new_v4(), "member").with_groups([Uuid::new_v4()]);
        let ov = GroupPermissionOverride::all(
            Uuid::new_v4(),
            EntityType::Sites,
            PartialPermissionSet::new().with(Action::Delete, true),
        );

        let trace = resolve_traced(&user, EntityType::Sites, None, &[ov], &[member_role()]);
        assert_eq!(trace.effective, PermissionSet::READ_ONLY);
        assert!(trace.applied_overrides.is_empty());
    }

    #[test]
    fn trace_lists_all_scope_before_specific() {
        let group = Uuid::new_v4();
        let user = User::new(Uuid::new_v4(), "member").with_groups([group]);
        let specific = GroupPermissionOverride::specific(
            group,
            EntityType::Sites,
            ["site-1"],
            PartialPermissionSet::new().with(Action::Update, true),
        );
        let all = GroupPermissionOverride::all(
            group,
            EntityType::Sites,
            PartialPermissionSet::new().with(Action::Create, true),
        );
        let overrides = vec![specific.clone(), all.clone()];

        let trace = resolve_traced(&user, EntityType::Sites, Some("site-1"), &overrides, &[member_role()]);
        assert_eq!(trace.applied_overrides, vec![all.id, specific.id]);
        assert!(trace.effective.create && trace.effective.update);
    }

    #[test]
    fn resolve_all_covers_every_kind() {
        let user = User::new(Uuid::new_v4(), "member");
        let summary = resolve_all(&user, &[], &[member_role()]);

        assert_eq!(summary.len(), EntityType::ALL.len());
        assert_eq!(summary[&EntityType::Sites], PermissionSet::READ_ONLY);
        assert_eq!(summary[&EntityType::AdminLogs], PermissionSet::ALL_FALSE);
    }
}
