pub mod entity_type;
pub mod group;
pub mod override_rule;
pub mod permission;
pub mod role;
pub mod user;

pub use entity_type::{EntityType, UnknownEntityType};
pub use group::Group;
pub use override_rule::{GroupPermissionOverride, OverrideScope};
pub use permission::{Action, PartialPermissionSet, PermissionSet, UnknownAction};
pub use role::Role;
pub use user::User;
