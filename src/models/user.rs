use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The identity the resolver evaluates: exactly one role plus any number of groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "viewer")]
    pub role_id: String,
    #[serde(default)]
    #[schema(value_type = Vec<Uuid>)]
    pub group_ids: BTreeSet<Uuid>,
}

impl User {
    pub fn new(id: Uuid, role_id: impl Into<String>) -> Self {
        Self {
            id,
            name: String::new(),
            role_id: role_id.into(),
            group_ids: BTreeSet::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = Uuid>) -> Self {
        self.group_ids.extend(groups);
        self
    }

    pub fn in_group(&self, group_id: Uuid) -> bool {
        self.group_ids.contains(&group_id)
    }
}
