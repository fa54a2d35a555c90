//! End-to-end coverage for the normalize-then-persist avatar workflow.
//!
//! These tests feed raw JSON payloads through the normalizer and the SQLite
//! store exactly as the HTTP layer does, against an isolated database with
//! migrations applied.

use std::sync::Arc;

use fitspace_core::{normalize_mutation, AvatarStore};
use fitspace_domain::{AvatarError, UserContext};
use fitspace_infra::{DbManager, SqliteAvatarStore};
use serde_json::json;
use tempfile::TempDir;

struct DbHarness {
    #[allow(dead_code)]
    temp_dir: TempDir,
    manager: Arc<DbManager>,
}

impl DbHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("temporary directory should be created");
        let db_path = temp_dir.path().join("avatar-integration.db");

        let manager =
            Arc::new(DbManager::new(&db_path, 4).expect("database manager should initialise"));
        manager.run_migrations().expect("schema migrations should apply");

        Self { temp_dir, manager }
    }

    fn store(&self) -> SqliteAvatarStore {
        SqliteAvatarStore::new(Arc::clone(&self.manager))
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn raw_payload_round_trips_through_normalizer_and_store() {
    let harness = DbHarness::new();
    let store = harness.store();

    let payload = json!({
        "name": "  Morning Run  ",
        "gender": " Female ",
        "ageRange": "30-39",
        "source": "Web",
        "basicMeasurements": { "height": 171.5, "creationMode": "Scan" },
        "bodyMeasurements": { "waist": 74.0 },
        "morphTargets": [
            { "id": "jawWidth", "backendKey": "jaw_width", "value": 0.45 },
            ["browDepth", 0.2]
        ],
        "quickModeSettings": {
            "bodyShape": " Hourglass ",
            "measurements": { "hipCircumference": 96.0 }
        }
    });

    let mutation = normalize_mutation(&payload).expect("payload should normalize");
    let created = store.create_avatar("user-1", mutation, None).await.expect("create");

    assert_eq!(created.name, "Morning Run");
    assert_eq!(created.gender.as_deref(), Some("female"));
    assert_eq!(created.age_range.as_deref(), Some("30-39"));
    assert_eq!(created.creation_mode.as_deref(), Some("scan"));
    assert_eq!(created.source.as_deref(), Some("web"));
    // The reserved key never lands in the measurement table.
    assert!(!created.basic_measurements.contains_key("creationMode"));
    assert_eq!(created.basic_measurements["height"], 171.5);
    assert_eq!(created.body_measurements["waist"], 74.0);
    assert!(created.quick_mode, "settings presence implies quick mode");
    assert_eq!(
        created.quick_mode_settings.as_ref().and_then(|s| s.body_shape.as_deref()),
        Some("hourglass")
    );

    let ids: Vec<&str> = created.morph_targets.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["browDepth", "jawWidth"], "morph targets sorted by id");
    assert_eq!(created.morph_targets[1].slider_value, Some(0.45));

    let fetched = store.get_avatar("user-1", &created.id.to_string()).await.expect("get");
    assert_eq!(created, fetched);
}

#[tokio::test(flavor = "multi_thread")]
async fn serialized_profile_uses_wire_field_names() {
    let harness = DbHarness::new();
    let store = harness.store();

    let mutation = normalize_mutation(&json!({
        "name": "Wire Check",
        "quickMode": true
    }))
    .expect("normalize");
    let created = store.create_avatar("user-1", mutation, None).await.expect("create");

    let value = serde_json::to_value(&created).expect("serialize");
    let object = value.as_object().expect("profile serializes as an object");
    assert!(object.contains_key("userId"));
    assert!(object.contains_key("ageRange"));
    assert!(object.contains_key("quickMode"));
    assert!(object.contains_key("createdAt"));
    // Timestamps go out in RFC 3339 with a Z suffix.
    let created_at = object["createdAt"].as_str().expect("createdAt is a string");
    assert!(created_at.ends_with('Z'), "got {created_at}");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_invalid_payload_leaves_profile_untouched() {
    let harness = DbHarness::new();
    let store = harness.store();

    let mutation = normalize_mutation(&json!({ "name": "Original", "gender": "male" }))
        .expect("normalize");
    let created = store.create_avatar("user-1", mutation, None).await.expect("create");

    // Validation happens before any store call; a bad enum never reaches SQL.
    let err = normalize_mutation(&json!({ "name": "Broken", "gender": "robot" })).unwrap_err();
    assert!(matches!(err, AvatarError::Validation { .. }));

    let fetched = store.get_avatar("user-1", &created.id.to_string()).await.expect("get");
    assert_eq!(fetched.name, "Original");
    assert_eq!(fetched.gender.as_deref(), Some("male"));
}

#[tokio::test(flavor = "multi_thread")]
async fn quota_and_slot_lifecycle_across_the_full_stack() {
    let harness = DbHarness::new();
    let store = harness.store();

    let mut ids = Vec::new();
    for i in 1..=5 {
        let mutation =
            normalize_mutation(&json!({ "name": format!("Avatar {i}") })).expect("normalize");
        let created = store.create_avatar("user-1", mutation, None).await.expect("create");
        ids.push(created.id);
    }

    let mutation = normalize_mutation(&json!({ "name": "Sixth" })).expect("normalize");
    let err = store.create_avatar("user-1", mutation, None).await.unwrap_err();
    assert_eq!(err, AvatarError::QuotaExceeded);

    store.delete_avatar("user-1", &ids[0].to_string()).await.expect("delete");
    let mutation = normalize_mutation(&json!({ "name": "Sixth" })).expect("normalize");
    store.create_avatar("user-1", mutation, None).await.expect("slot freed");

    let listed = store.list_avatars("user-1", 5, None).await.expect("list");
    assert_eq!(listed.count, 5);
    assert_eq!(listed.total, 5);
}

#[tokio::test(flavor = "multi_thread")]
async fn context_sync_shadows_the_identity_provider() {
    let harness = DbHarness::new();
    let store = harness.store();

    let mut context = UserContext::bare("user-7");
    context.email = Some("runner@example.com".into());
    context.session_id = Some("session-42".into());

    let mutation = normalize_mutation(&json!({ "name": "Synced" })).expect("normalize");
    store.create_avatar("user-7", mutation, Some(context)).await.expect("create");

    let conn = harness.manager.get_connection().expect("conn");
    let email: Option<String> = conn
        .query_row("SELECT email FROM users WHERE id = 'user-7'", [], |row| row.get(0))
        .expect("user row exists");
    assert_eq!(email.as_deref(), Some("runner@example.com"));
}
