use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{EntityType, PartialPermissionSet};

/// Whether an override covers every instance of a kind or an enumerated subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverrideScope {
    All,
    Specific,
}

/// A group-scoped adjustment to one resource kind's permissions.
///
/// Scope `all` can only add bits to the role default. Scope `specific` replaces
/// the bits it mentions, for the listed entity ids only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupPermissionOverride {
    pub id: Uuid,
    pub group_id: Uuid,
    pub entity_type: EntityType,
    pub scope: OverrideScope,
    /// Only meaningful for `OverrideScope::Specific`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_entity_ids: Vec<String>,
    pub permissions: PartialPermissionSet,
}

impl GroupPermissionOverride {
    pub fn all(group_id: Uuid, entity_type: EntityType, permissions: PartialPermissionSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            entity_type,
            scope: OverrideScope::All,
            specific_entity_ids: Vec::new(),
            permissions,
        }
    }

    pub fn specific<I, S>(
        group_id: Uuid,
        entity_type: EntityType,
        entity_ids: I,
        permissions: PartialPermissionSet,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Uuid::new_v4(),
            group_id,
            entity_type,
            scope: OverrideScope::Specific,
            specific_entity_ids: entity_ids.into_iter().map(Into::into).collect(),
            permissions,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Whether this override targets `entity_id`.
    ///
    /// `all` overrides target every instance, with or without an id. `specific`
    /// overrides never activate without an id.
    pub fn applies_to_entity(&self, entity_id: Option<&str>) -> bool {
        match self.scope {
            OverrideScope::All => true,
            OverrideScope::Specific => entity_id
                .map(|id| self.specific_entity_ids.iter().any(|candidate| candidate == id))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    #[test]
    fn specific_override_needs_matching_id() {
        let ov = GroupPermissionOverride::specific(
            Uuid::new_v4(),
            EntityType::Sites,
            ["site-1", "site-2"],
            PartialPermissionSet::new().with(Action::Update, true),
        );

        assert!(ov.applies_to_entity(Some("site-2")));
        assert!(!ov.applies_to_entity(Some("site-3")));
        assert!(!ov.applies_to_entity(None));
    }

    #[test]
    fn all_override_ignores_entity_id() {
        let ov = GroupPermissionOverride::all(
            Uuid::new_v4(),
            EntityType::Documents,
            PartialPermissionSet::new().with(Action::Create, true),
        );

        assert!(ov.applies_to_entity(None));
        assert!(ov.applies_to_entity(Some("doc-9")));
    }

    #[test]
    fn deserializes_wire_shape() {
        let ov: GroupPermissionOverride = serde_json::from_value(serde_json::json!({
            "id": "7d3c1c9e-4b8f-4a55-9a0e-1b2c3d4e5f60",
            "group_id": "0b7e6f1a-2c3d-4e5f-8a9b-0c1d2e3f4a5b",
            "entity_type": "sites",
            "scope": "specific",
            "specific_entity_ids": ["site-1"],
            "permissions": { "update": false }
        }))
        .unwrap();

        assert_eq!(ov.scope, OverrideScope::Specific);
        assert_eq!(ov.permissions.get(Action::Update), Some(false));
        assert_eq!(ov.permissions.get(Action::Read), None);
    }
}
