use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the four CRUD capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

// =============================================================================
// PERMISSION SET
// =============================================================================

/// The four-bit CRUD capability tuple. The zero value grants nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct PermissionSet {
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub delete: bool,
}

impl PermissionSet {
    pub const ALL_FALSE: PermissionSet = PermissionSet {
        create: false,
        read: false,
        update: false,
        delete: false,
    };

    pub const FULL: PermissionSet = PermissionSet {
        create: true,
        read: true,
        update: true,
        delete: true,
    };

    pub const READ_ONLY: PermissionSet = PermissionSet {
        create: false,
        read: true,
        update: false,
        delete: false,
    };

    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::Create => self.create,
            Action::Read => self.read,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }

    pub fn set(&mut self, action: Action, value: bool) {
        match action {
            Action::Create => self.create = value,
            Action::Read => self.read = value,
            Action::Update => self.update = value,
            Action::Delete => self.delete = value,
        }
    }

    pub fn with(mut self, action: Action, value: bool) -> Self {
        self.set(action, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Action::ALL.iter().all(|action| !self.get(*action))
    }
}

// =============================================================================
// PARTIAL PERMISSION SET
// =============================================================================

/// Sparse permission tuple carried by overrides.
///
/// An absent field means the override is silent on that action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct PartialPermissionSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

impl PartialPermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, action: Action) -> Option<bool> {
        match action {
            Action::Create => self.create,
            Action::Read => self.read,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }

    pub fn with(mut self, action: Action, value: bool) -> Self {
        match action {
            Action::Create => self.create = Some(value),
            Action::Read => self.read = Some(value),
            Action::Update => self.update = Some(value),
            Action::Delete => self.delete = Some(value),
        }
        self
    }

    /// True when the override carries no opinion on any action.
    pub fn is_silent(&self) -> bool {
        Action::ALL.iter().all(|action| self.get(*action).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_all_false() {
        assert_eq!(PermissionSet::default(), PermissionSet::ALL_FALSE);
        assert!(PermissionSet::default().is_empty());
    }

    #[test]
    fn get_and_set_address_single_bit() {
        let set = PermissionSet::ALL_FALSE.with(Action::Update, true);
        assert!(set.update);
        assert!(!set.create && !set.read && !set.delete);
        assert!(set.get(Action::Update));
    }

    #[test]
    fn missing_fields_deserialize_as_false() {
        let set: PermissionSet = serde_json::from_str(r#"{"read": true}"#).unwrap();
        assert_eq!(set, PermissionSet::READ_ONLY);
    }

    #[test]
    fn partial_set_omits_absent_fields() {
        let partial = PartialPermissionSet::new().with(Action::Create, true);
        let json = serde_json::to_value(partial).unwrap();
        assert_eq!(json, serde_json::json!({ "create": true }));

        let back: PartialPermissionSet = serde_json::from_value(json).unwrap();
        assert_eq!(back.get(Action::Create), Some(true));
        assert_eq!(back.get(Action::Delete), None);
        assert!(!back.is_silent());
        assert!(PartialPermissionSet::new().is_silent());
    }

    #[test]
    fn explicit_false_is_not_absent() {
        let partial: PartialPermissionSet = serde_json::from_str(r#"{"update": false}"#).unwrap();
        assert_eq!(partial.get(Action::Update), Some(false));
    }

    #[test]
    fn action_parses_case_insensitively() {
        assert_eq!("Delete".parse::<Action>(), Ok(Action::Delete));
        assert!("archive".parse::<Action>().is_err());
    }
}
