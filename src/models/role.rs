use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EntityType, PermissionSet};

// =============================================================================
// ROLE
// =============================================================================

/// A named bundle of default permissions, one set per resource kind.
///
/// Roles are reference data: they are edited by administrative flows and
/// handed to the resolver as a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    #[schema(example = "project_manager")]
    pub id: String,
    #[schema(example = "Project Manager")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub permissions: BTreeMap<EntityType, PermissionSet>,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            permissions: BTreeMap::new(),
        }
    }

    pub fn with_permissions(mut self, entity_type: EntityType, permissions: PermissionSet) -> Self {
        self.permissions.insert(entity_type, permissions);
        self
    }

    /// Default permissions for `entity_type`; a kind missing from the map grants nothing.
    pub fn permissions_for(&self, entity_type: EntityType) -> PermissionSet {
        self.permissions
            .get(&entity_type)
            .copied()
            .unwrap_or(PermissionSet::ALL_FALSE)
    }
}
