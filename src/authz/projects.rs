//! Project guards and helpers for work scoped to a project.
//!
//! Editing or deleting a project is reserved for its creator or an
//! administrator. Tasks and comments have no ownership gate of their own, but
//! acting on them inside a project requires read access to that project.

use uuid::Uuid;

use super::guard::{allowed, GuardRequest};
use crate::models::{Action, EntityType, GroupPermissionOverride, Role, User};

pub fn can_create_project(user: Option<&User>, overrides: &[GroupPermissionOverride], roles: &[Role]) -> bool {
    allowed(user, GuardRequest::new(EntityType::Projects, Action::Create), overrides, roles)
}

pub fn can_view_project(
    user: Option<&User>,
    project_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let mut request = GuardRequest::new(EntityType::Projects, Action::Read);
    request.resource_id = project_id;
    allowed(user, request, overrides, roles)
}

pub fn can_edit_project(
    user: Option<&User>,
    project_id: &str,
    creator_id: Option<Uuid>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let request = GuardRequest::new(EntityType::Projects, Action::Update)
        .on(project_id)
        .created_by(creator_id);
    allowed(user, request, overrides, roles)
}

pub fn can_delete_project(
    user: Option<&User>,
    project_id: &str,
    creator_id: Option<Uuid>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let request = GuardRequest::new(EntityType::Projects, Action::Delete)
        .on(project_id)
        .created_by(creator_id);
    allowed(user, request, overrides, roles)
}

fn within_project(
    user: Option<&User>,
    project_id: &str,
    request: GuardRequest<'_>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    can_view_project(user, Some(project_id), overrides, roles) && allowed(user, request, overrides, roles)
}

pub fn can_add_task(
    user: Option<&User>,
    project_id: &str,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    within_project(user, project_id, GuardRequest::new(EntityType::Tasks, Action::Create), overrides, roles)
}

pub fn can_edit_task(
    user: Option<&User>,
    project_id: &str,
    task_id: &str,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let request = GuardRequest::new(EntityType::Tasks, Action::Update).on(task_id);
    within_project(user, project_id, request, overrides, roles)
}

pub fn can_delete_task(
    user: Option<&User>,
    project_id: &str,
    task_id: &str,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let request = GuardRequest::new(EntityType::Tasks, Action::Delete).on(task_id);
    within_project(user, project_id, request, overrides, roles)
}

pub fn can_post_comment(
    user: Option<&User>,
    project_id: &str,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    within_project(user, project_id, GuardRequest::new(EntityType::Comments, Action::Create), overrides, roles)
}
