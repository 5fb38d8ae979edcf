//! Caller-supplied registry snapshot.
//!
//! Roles, groups, users and overrides live in whatever store the host uses.
//! The engine only ever sees an immutable copy of them, loaded here from JSON.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::{authorize, resolve, resolve_all, AccessDecision, GuardRequest};
use crate::errors::{AppError, AppResult};
use crate::models::{EntityType, Group, GroupPermissionOverride, OverrideScope, PermissionSet, Role, User};

/// Display labels per resource kind, keyed by entity id.
pub type NameDirectory = BTreeMap<EntityType, BTreeMap<String, String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub users: Vec<User>,
    /// Applied in this order; see `authz::resolve`.
    #[serde(default)]
    pub overrides: Vec<GroupPermissionOverride>,
    #[serde(default)]
    pub names: NameDirectory,
}

impl PermissionSnapshot {
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let snapshot =
            Self::decode(&raw).map_err(|msg| AppError::snapshot(format!("{}: {msg}", path.display())))?;

        tracing::info!(
            path = %path.display(),
            roles = snapshot.roles.len(),
            groups = snapshot.groups.len(),
            users = snapshot.users.len(),
            overrides = snapshot.overrides.len(),
            "permission snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Decode a snapshot, reporting the JSON path of the first bad field.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        Self::decode(raw).map_err(AppError::snapshot)
    }

    fn decode(raw: &str) -> Result<Self, String> {
        let de = &mut serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize(de).map_err(|err| format!("invalid field `{}`: {}", err.path(), err.inner()))
    }

    pub fn user(&self, user_id: Uuid) -> Option<&User> {
        self.users.iter().find(|user| user.id == user_id)
    }

    pub fn role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == role_id)
    }

    pub fn group(&self, group_id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    pub fn override_rule(&self, override_id: Uuid) -> Option<&GroupPermissionOverride> {
        self.overrides.iter().find(|ov| ov.id == override_id)
    }

    /// Effective permissions for a user id; an unknown user gets nothing.
    pub fn resolve_for_user(
        &self,
        user_id: Uuid,
        entity_type: EntityType,
        entity_id: Option<&str>,
    ) -> PermissionSet {
        self.user(user_id)
            .map(|user| resolve(user, entity_type, entity_id, &self.overrides, &self.roles))
            .unwrap_or(PermissionSet::ALL_FALSE)
    }

    pub fn summary_for_user(&self, user_id: Uuid) -> BTreeMap<EntityType, PermissionSet> {
        match self.user(user_id) {
            Some(user) => resolve_all(user, &self.overrides, &self.roles),
            None => EntityType::ALL
                .into_iter()
                .map(|kind| (kind, PermissionSet::ALL_FALSE))
                .collect(),
        }
    }

    pub fn authorize_user(&self, user_id: Uuid, request: GuardRequest<'_>) -> AccessDecision {
        authorize(self.user(user_id), request, &self.overrides, &self.roles)
    }

    /// Consistency problems between the registries.
    ///
    /// Advisory only: the resolver trusts `User::group_ids` as given.
    pub fn membership_issues(&self) -> Vec<MembershipIssue> {
        let mut issues = Vec::new();

        for user in &self.users {
            for group_id in &user.group_ids {
                match self.group(*group_id) {
                    None => issues.push(MembershipIssue::UnknownGroupOnUser {
                        user_id: user.id,
                        group_id: *group_id,
                    }),
                    Some(group) if !group.has_member(user.id) => issues.push(MembershipIssue::MissingFromGroup {
                        user_id: user.id,
                        group_id: *group_id,
                    }),
                    Some(_) => {}
                }
            }
        }

        for group in &self.groups {
            for member_id in &group.member_ids {
                match self.user(*member_id) {
                    Some(user) if !user.in_group(group.id) => issues.push(MembershipIssue::MissingFromUser {
                        user_id: *member_id,
                        group_id: group.id,
                    }),
                    _ => {}
                }
            }
        }

        for ov in &self.overrides {
            if self.group(ov.group_id).is_none() {
                issues.push(MembershipIssue::UnknownGroupOnOverride {
                    override_id: ov.id,
                    group_id: ov.group_id,
                });
            }
            if ov.scope == OverrideScope::Specific && ov.specific_entity_ids.is_empty() {
                issues.push(MembershipIssue::EmptySpecificOverride { override_id: ov.id });
            }
        }

        issues
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MembershipIssue {
    #[error("user {user_id} lists unknown group {group_id}")]
    UnknownGroupOnUser { user_id: Uuid, group_id: Uuid },
    #[error("user {user_id} lists group {group_id} but is not among its members")]
    MissingFromGroup { user_id: Uuid, group_id: Uuid },
    #[error("group {group_id} lists member {user_id} who does not list the group")]
    MissingFromUser { user_id: Uuid, group_id: Uuid },
    #[error("override {override_id} targets unknown group {group_id}")]
    UnknownGroupOnOverride { override_id: Uuid, group_id: Uuid },
    #[error("override {override_id} has scope specific but no entity ids")]
    EmptySpecificOverride { override_id: Uuid },
}
