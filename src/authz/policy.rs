use crate::models::{Action, EntityType};

/// Per-kind authorization policy layered on top of the resolver.
///
/// Actions listed in `requires_ownership_for` are only checked against the
/// resolver when the caller is the resource creator or an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePolicy {
    pub entity_type: EntityType,
    pub requires_ownership_for: &'static [Action],
}

const CREATOR_MUTATES: &[Action] = &[Action::Update, Action::Delete];
const UNGATED: &[Action] = &[];

impl ResourcePolicy {
    pub fn requires_ownership(&self, action: Action) -> bool {
        self.requires_ownership_for.contains(&action)
    }
}

/// The single table of ownership policies. New kinds default to ungated.
pub fn policy_for(entity_type: EntityType) -> ResourcePolicy {
    let requires_ownership_for = match entity_type {
        EntityType::Sites | EntityType::Projects | EntityType::NtpChecklists => CREATOR_MUTATES,
        EntityType::Workflows
        | EntityType::Tasks
        | EntityType::Comments
        | EntityType::UserManagement
        | EntityType::Documents
        | EntityType::Designs
        | EntityType::Financials
        | EntityType::Components
        | EntityType::Boqs
        | EntityType::AdminLogs => UNGATED,
    };

    ResourcePolicy {
        entity_type,
        requires_ownership_for,
    }
}
