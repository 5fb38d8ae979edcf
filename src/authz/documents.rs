//! Document guards. Documents carry no ownership gate; every check is the
//! resolver's bit for the document.

use super::guard::{allowed, GuardRequest};
use crate::models::{Action, EntityType, GroupPermissionOverride, Role, User};

fn document_request(action: Action, document_id: Option<&str>) -> GuardRequest<'_> {
    let mut request = GuardRequest::new(EntityType::Documents, action);
    request.resource_id = document_id;
    request
}

pub fn can_upload_document(user: Option<&User>, overrides: &[GroupPermissionOverride], roles: &[Role]) -> bool {
    allowed(user, document_request(Action::Create, None), overrides, roles)
}

pub fn can_view_document(
    user: Option<&User>,
    document_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    allowed(user, document_request(Action::Read, document_id), overrides, roles)
}

/// Annotating is a write to the document.
pub fn can_annotate_document(
    user: Option<&User>,
    document_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    allowed(user, document_request(Action::Update, document_id), overrides, roles)
}

/// Moving a document through review states is a write to the document.
pub fn can_change_document_status(
    user: Option<&User>,
    document_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    allowed(user, document_request(Action::Update, document_id), overrides, roles)
}

pub fn can_delete_document(
    user: Option<&User>,
    document_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    allowed(user, document_request(Action::Delete, document_id), overrides, roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PartialPermissionSet, PermissionSet};
    use uuid::Uuid;

    fn reviewer() -> Role {
        Role::new("reviewer", "Reviewer").with_permissions(
            EntityType::Documents,
            PermissionSet::READ_ONLY.with(Action::Update, true),
        )
    }

    #[test]
    fn reviewer_can_annotate_but_not_upload() {
        let user = User::new(Uuid::new_v4(), "reviewer");
        let roles = [reviewer()];

        assert!(can_view_document(Some(&user), Some("doc-1"), &[], &roles));
        assert!(can_annotate_document(Some(&user), Some("doc-1"), &[], &roles));
        assert!(can_change_document_status(Some(&user), None, &[], &roles));
        assert!(!can_upload_document(Some(&user), &[], &roles));
        assert!(!can_delete_document(Some(&user), Some("doc-1"), &[], &roles));
    }

    #[test]
    fn specific_revoke_locks_one_document() {
        let group = Uuid::new_v4();
        let user = User::new(Uuid::new_v4(), "reviewer").with_groups([group]);
        let lock = GroupPermissionOverride::specific(
            group,
            EntityType::Documents,
            ["doc-signed"],
            PartialPermissionSet::new().with(Action::Update, false),
        );
        let roles = [reviewer()];

        assert!(!can_annotate_document(Some(&user), Some("doc-signed"), &[lock.clone()], &roles));
        assert!(can_annotate_document(Some(&user), Some("doc-draft"), &[lock], &roles));
    }

    #[test]
    fn no_ownership_gate_on_delete() {
        let group = Uuid::new_v4();
        let user = User::new(Uuid::new_v4(), "reviewer").with_groups([group]);
        let grant = GroupPermissionOverride::all(
            group,
            EntityType::Documents,
            PartialPermissionSet::new().with(Action::Delete, true),
        );

        assert!(can_delete_document(Some(&user), Some("doc-1"), &[grant], &[reviewer()]));
    }
}
