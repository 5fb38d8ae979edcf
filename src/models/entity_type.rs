use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Resource kinds governed by the permission engine.
///
/// Every role map and every override references a member of this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Projects,
    Workflows,
    Tasks,
    Comments,
    UserManagement,
    Documents,
    Designs,
    Financials,
    Components,
    Boqs,
    Sites,
    NtpChecklists,
    AdminLogs,
}

impl EntityType {
    /// All resource kinds in declaration order.
    pub const ALL: [EntityType; 13] = [
        EntityType::Projects,
        EntityType::Workflows,
        EntityType::Tasks,
        EntityType::Comments,
        EntityType::UserManagement,
        EntityType::Documents,
        EntityType::Designs,
        EntityType::Financials,
        EntityType::Components,
        EntityType::Boqs,
        EntityType::Sites,
        EntityType::NtpChecklists,
        EntityType::AdminLogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Projects => "projects",
            EntityType::Workflows => "workflows",
            EntityType::Tasks => "tasks",
            EntityType::Comments => "comments",
            EntityType::UserManagement => "user_management",
            EntityType::Documents => "documents",
            EntityType::Designs => "designs",
            EntityType::Financials => "financials",
            EntityType::Components => "components",
            EntityType::Boqs => "boqs",
            EntityType::Sites => "sites",
            EntityType::NtpChecklists => "ntp_checklists",
            EntityType::AdminLogs => "admin_logs",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity type: {0}")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        EntityType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownEntityType(s.to_string()))
    }
}
