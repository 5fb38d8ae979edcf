//! Notice-to-proceed checklist guards. Same ownership shape as sites.

use uuid::Uuid;

use super::guard::{allowed, GuardRequest};
use crate::models::{Action, EntityType, GroupPermissionOverride, Role, User};

pub fn can_create_checklist(user: Option<&User>, overrides: &[GroupPermissionOverride], roles: &[Role]) -> bool {
    allowed(user, GuardRequest::new(EntityType::NtpChecklists, Action::Create), overrides, roles)
}

pub fn can_view_checklist(
    user: Option<&User>,
    checklist_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let mut request = GuardRequest::new(EntityType::NtpChecklists, Action::Read);
    request.resource_id = checklist_id;
    allowed(user, request, overrides, roles)
}

pub fn can_update_checklist(
    user: Option<&User>,
    checklist_id: &str,
    creator_id: Option<Uuid>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let request = GuardRequest::new(EntityType::NtpChecklists, Action::Update)
        .on(checklist_id)
        .created_by(creator_id);
    allowed(user, request, overrides, roles)
}

pub fn can_delete_checklist(
    user: Option<&User>,
    checklist_id: &str,
    creator_id: Option<Uuid>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let request = GuardRequest::new(EntityType::NtpChecklists, Action::Delete)
        .on(checklist_id)
        .created_by(creator_id);
    allowed(user, request, overrides, roles)
}
