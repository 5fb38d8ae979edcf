use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A named collection of users that may carry permission overrides.
///
/// `member_ids` mirrors `User::group_ids`; the surrounding store keeps both
/// sides consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: Uuid,
    #[schema(example = "Site Engineers")]
    pub name: String,
    #[serde(default)]
    #[schema(value_type = Vec<Uuid>)]
    pub member_ids: BTreeSet<Uuid>,
}

impl Group {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            member_ids: BTreeSet::new(),
        }
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = Uuid>) -> Self {
        self.member_ids.extend(members);
        self
    }

    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.member_ids.contains(&user_id)
    }
}
