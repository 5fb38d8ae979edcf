use std::fs;

use anyhow::Result;
use tempfile::tempdir;
use uuid::Uuid;

use permission_engine::authz::documents::{can_annotate_document, can_upload_document};
use permission_engine::models::EntityType;
use permission_engine::PermissionSnapshot;

const USER_ID: &str = "5f0c2a4e-8d7b-4f5e-9c1a-2b3d4e5f6a7b";
const GROUP_ID: &str = "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d";

fn snapshot_json() -> String {
    serde_json::json!({
        "roles": [
            {
                "id": "user",
                "name": "User",
                "permissions": {
                    "documents": { "read": true, "update": true }
                }
            }
        ],
        "groups": [ { "id": GROUP_ID, "name": "Document Control", "member_ids": [USER_ID] } ],
        "users": [ { "id": USER_ID, "name": "Lin", "role_id": "user", "group_ids": [GROUP_ID] } ],
        "overrides": [
            {
                "id": "11111111-1111-4111-8111-111111111111",
                "group_id": GROUP_ID,
                "entity_type": "documents",
                "scope": "all",
                "permissions": { "create": true }
            },
            {
                "id": "22222222-2222-4222-8222-222222222222",
                "group_id": GROUP_ID,
                "entity_type": "documents",
                "scope": "specific",
                "specific_entity_ids": ["doc-issued"],
                "permissions": { "update": false }
            }
        ],
        "names": { "documents": { "doc-issued": "Issued for Construction" } }
    })
    .to_string()
}

#[test]
fn loads_snapshot_and_answers_guards() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("snapshot.json");
    fs::write(&path, snapshot_json())?;

    let snapshot = PermissionSnapshot::load(&path)?;
    assert!(snapshot.membership_issues().is_empty());

    let user_id: Uuid = USER_ID.parse()?;
    let user = snapshot.user(user_id);

    assert!(can_upload_document(user, &snapshot.overrides, &snapshot.roles));
    assert!(can_annotate_document(user, Some("doc-draft"), &snapshot.overrides, &snapshot.roles));
    assert!(!can_annotate_document(user, Some("doc-issued"), &snapshot.overrides, &snapshot.roles));

    let summary = snapshot.summary_for_user(user_id);
    assert!(summary[&EntityType::Documents].create);
    assert!(summary[&EntityType::Documents].update);
    assert_eq!(snapshot.names[&EntityType::Documents]["doc-issued"], "Issued for Construction");
    Ok(())
}

#[test]
fn load_error_names_file_and_field() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{ "users": [ { "id": "not-a-uuid", "role_id": "user" } ] }"#)?;

    let err = PermissionSnapshot::load(&path).unwrap_err().to_string();
    assert!(err.contains("broken.json"), "unexpected error: {err}");
    assert!(err.contains("users[0].id"), "unexpected error: {err}");
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = PermissionSnapshot::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, permission_engine::errors::AppError::Io(_)));
}

#[test]
fn demo_snapshot_is_consistent() -> Result<()> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/snapshot.example.json");
    let snapshot = PermissionSnapshot::load(path)?;

    assert!(snapshot.membership_issues().is_empty());
    assert_eq!(snapshot.roles.len(), 3);
    Ok(())
}
