//! Site guards. Update and delete are reserved for the site's creator or an
//! administrator, and still require the matching permission bit.

use uuid::Uuid;

use super::guard::{allowed, GuardRequest};
use crate::models::{Action, EntityType, GroupPermissionOverride, Role, User};

pub fn can_create_site(user: Option<&User>, overrides: &[GroupPermissionOverride], roles: &[Role]) -> bool {
    allowed(user, GuardRequest::new(EntityType::Sites, Action::Create), overrides, roles)
}

pub fn can_view_site(
    user: Option<&User>,
    site_id: Option<&str>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let mut request = GuardRequest::new(EntityType::Sites, Action::Read);
    request.resource_id = site_id;
    allowed(user, request, overrides, roles)
}

pub fn can_update_site(
    user: Option<&User>,
    site_id: &str,
    creator_id: Option<Uuid>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let request = GuardRequest::new(EntityType::Sites, Action::Update)
        .on(site_id)
        .created_by(creator_id);
    allowed(user, request, overrides, roles)
}

pub fn can_delete_site(
    user: Option<&User>,
    site_id: &str,
    creator_id: Option<Uuid>,
    overrides: &[GroupPermissionOverride],
    roles: &[Role],
) -> bool {
    let request = GuardRequest::new(EntityType::Sites, Action::Delete)
        .on(site_id)
        .created_by(creator_id);
    allowed(user, request, overrides, roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::ADMIN_ROLE_ID;
    use crate::models::{PartialPermissionSet, PermissionSet};

    fn roles() -> Vec<Role> {
        vec![
            Role::new(ADMIN_ROLE_ID, "Administrator").with_permissions(EntityType::Sites, PermissionSet::FULL),
            Role::new("engineer", "Engineer").with_permissions(
                EntityType::Sites,
                PermissionSet::READ_ONLY.with(Action::Create, true),
            ),
        ]
    }

    #[test]
    fn create_and_view_skip_ownership() {
        let user = User::new(Uuid::new_v4(), "engineer");
        assert!(can_create_site(Some(&user), &[], &roles()));
        assert!(can_view_site(Some(&user), Some("site-1"), &[], &roles()));
    }

    #[test]
    fn creator_without_update_bit_is_denied() {
        let user = User::new(Uuid::new_v4(), "engineer");
        assert!(!can_update_site(Some(&user), "site-1", Some(user.id), &[], &roles()));
    }

    #[test]
    fn creator_with_group_grant_may_update() {
        let group = Uuid::new_v4();
        let user = User::new(Uuid::new_v4(), "engineer").with_groups([group]);
        let grant = GroupPermissionOverride::specific(
            group,
            EntityType::Sites,
            ["site-1"],
            PartialPermissionSet::new().with(Action::Update, true),
        );

        assert!(can_update_site(Some(&user), "site-1", Some(user.id), &[grant.clone()], &roles()));
        assert!(!can_update_site(Some(&user), "site-1", Some(Uuid::new_v4()), &[grant], &roles()));
    }

    #[test]
    fn admin_may_delete_any_site() {
        let admin = User::new(Uuid::new_v4(), ADMIN_ROLE_ID);
        assert!(can_delete_site(Some(&admin), "site-7", Some(Uuid::new_v4()), &[], &roles()));
        assert!(!can_delete_site(None, "site-7", None, &[], &roles()));
    }
}
