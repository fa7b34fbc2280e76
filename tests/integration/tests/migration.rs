//! Single-user migration tests.

use serde_json::json;
use st_admin::ApiError;
use st_migrate::{CliError, MigrationOutcome};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{mount_get, sample_metadata, TestEnv, DESTINATION_KEY, SOURCE_KEY};

/// Tests a complete migration of a user with profile, metadata and roles.
#[tokio::test]
async fn test_migrate_user_completes() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", sample_metadata(), &["user", "admin"]).await;
    env.mount_sign_up("u-1", "generated-u-1", true).await;

    Mock::given(method("POST"))
        .and(path("/recipe/userid/map"))
        .and(body_json(json!({
            "superTokensUserId": "generated-u-1",
            "externalUserId": "u-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&env.destination)
        .await;
    for role in ["user", "admin"] {
        Mock::given(method("PUT"))
            .and(path("/recipe/user/role"))
            .and(body_json(json!({"userId": "u-1", "role": role})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "didUserAlreadyHaveRole": false
            })))
            .expect(1)
            .mount(&env.destination)
            .await;
    }
    Mock::given(method("PUT"))
        .and(path("/recipe/user/metadata"))
        .and(body_json(json!({"userId": "u-1", "metadataUpdate": sample_metadata()})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "OK", "metadata": sample_metadata()})),
        )
        .expect(1)
        .mount(&env.destination)
        .await;
    env.mount_destination_reads("u-1", sample_metadata(), &["admin", "user"]).await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::Completed);

    env.destination.verify().await;
    Ok(())
}

/// Tests that empty source metadata skips the user without destination writes.
#[tokio::test]
async fn test_missing_metadata_skips() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", json!({}), &["user"]).await;
    env.forbid_destination_calls().await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::SkippedMissingSourceData);

    env.destination.verify().await;
    Ok(())
}

/// Tests that an empty source role list skips the user without destination writes.
#[tokio::test]
async fn test_missing_roles_skips() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", sample_metadata(), &[]).await;
    env.forbid_destination_calls().await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::SkippedMissingSourceData);

    env.destination.verify().await;
    Ok(())
}

/// Tests that an id unknown to the source skips the user.
#[tokio::test]
async fn test_unknown_source_user_skips() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    mount_get(
        &env.source,
        SOURCE_KEY,
        "/user/id",
        "userId",
        "ghost",
        json!({"status": "UNKNOWN_USER_ID_ERROR"}),
    )
    .await;
    mount_get(
        &env.source,
        SOURCE_KEY,
        "/recipe/user/metadata",
        "userId",
        "ghost",
        json!({"status": "OK", "metadata": {}}),
    )
    .await;
    mount_get(
        &env.source,
        SOURCE_KEY,
        "/recipe/user/roles",
        "userId",
        "ghost",
        json!({"status": "OK", "roles": []}),
    )
    .await;
    env.forbid_destination_calls().await;

    let outcome = env.migrator.migrate_user("ghost").await?;
    assert_eq!(outcome, MigrationOutcome::SkippedMissingSourceData);

    env.destination.verify().await;
    Ok(())
}

/// Tests that a source user without a third-party login is skipped.
#[tokio::test]
async fn test_user_without_third_party_binding_skips() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mut user = crate::common::user("u-1");
    user["thirdParty"] = json!([]);
    mount_get(
        &env.source,
        SOURCE_KEY,
        "/user/id",
        "userId",
        "u-1",
        json!({"status": "OK", "user": user}),
    )
    .await;
    mount_get(
        &env.source,
        SOURCE_KEY,
        "/recipe/user/metadata",
        "userId",
        "u-1",
        json!({"status": "OK", "metadata": sample_metadata()}),
    )
    .await;
    mount_get(
        &env.source,
        SOURCE_KEY,
        "/recipe/user/roles",
        "userId",
        "u-1",
        json!({"status": "OK", "roles": ["user"]}),
    )
    .await;
    env.forbid_destination_calls().await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::SkippedMissingSourceData);

    env.destination.verify().await;
    Ok(())
}

/// Tests that a rejected mapping stops before roles and metadata are written.
#[tokio::test]
async fn test_mapping_failure_stops_migration() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", sample_metadata(), &["user"]).await;
    env.mount_sign_up("u-1", "generated-u-1", true).await;
    env.mount_mapping("u-1", "USER_ID_MAPPING_ALREADY_EXISTS_ERROR").await;
    env.mount_role_writes("u-1", 0).await;
    env.mount_metadata_write("u-1", sample_metadata(), 0).await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::FailedMapping);

    env.destination.verify().await;
    Ok(())
}

/// Tests that a mapping transport failure also stops before any write.
#[tokio::test]
async fn test_mapping_transport_failure_stops_migration() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", sample_metadata(), &["user"]).await;
    env.mount_sign_up("u-1", "generated-u-1", true).await;
    Mock::given(method("POST"))
        .and(path("/recipe/userid/map"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&env.destination)
        .await;
    env.mount_role_writes("u-1", 0).await;
    env.mount_metadata_write("u-1", sample_metadata(), 0).await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::FailedMapping);

    env.destination.verify().await;
    Ok(())
}

/// Tests that an unconfirmed already-mapped answer stops before any write.
#[tokio::test]
async fn test_unverified_mapping_stops_migration() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", sample_metadata(), &["user"]).await;
    env.mount_sign_up("u-1", "generated-u-1", true).await;
    env.mount_mapping("u-1", "UNKNOWN_SUPERTOKENS_USER_ID_ERROR").await;
    mount_get(
        &env.destination,
        DESTINATION_KEY,
        "/user/id",
        "userId",
        "u-1",
        json!({"status": "UNKNOWN_USER_ID_ERROR"}),
    )
    .await;
    env.mount_role_writes("u-1", 0).await;
    env.mount_metadata_write("u-1", sample_metadata(), 0).await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::FailedMapping);

    env.destination.verify().await;
    Ok(())
}

/// Tests that re-running an already migrated user succeeds and rewrites metadata.
#[tokio::test]
async fn test_rerun_is_idempotent() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", sample_metadata(), &["user"]).await;
    env.mount_sign_up("u-1", "generated-u-1", false).await;
    env.mount_mapping("u-1", "UNKNOWN_SUPERTOKENS_USER_ID_ERROR").await;
    Mock::given(method("PUT"))
        .and(path("/recipe/user/role"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "didUserAlreadyHaveRole": true
        })))
        .expect(1)
        .mount(&env.destination)
        .await;
    env.mount_metadata_write("u-1", sample_metadata(), 1).await;
    env.mount_destination_reads("u-1", sample_metadata(), &["user"]).await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::Completed);

    env.destination.verify().await;
    Ok(())
}

/// Tests that a destination without roles after migration fails verification.
#[tokio::test]
async fn test_verification_failure() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", sample_metadata(), &["user"]).await;
    env.mount_sign_up("u-1", "generated-u-1", true).await;
    env.mount_mapping("u-1", "OK").await;
    env.mount_role_writes("u-1", 1).await;
    env.mount_metadata_write("u-1", sample_metadata(), 1).await;
    env.mount_destination_reads("u-1", sample_metadata(), &[]).await;

    let outcome = env.migrator.migrate_user("u-1").await?;
    assert_eq!(outcome, MigrationOutcome::FailedVerification);

    env.destination.verify().await;
    Ok(())
}

/// Tests that a failed role assignment aborts the user before metadata is written.
#[tokio::test]
async fn test_role_failure_aborts_migration() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.mount_source_user("u-1", sample_metadata(), &["user"]).await;
    env.mount_sign_up("u-1", "generated-u-1", true).await;
    env.mount_mapping("u-1", "OK").await;
    Mock::given(method("PUT"))
        .and(path("/recipe/user/role"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&env.destination)
        .await;
    env.mount_metadata_write("u-1", sample_metadata(), 0).await;

    let err = env.migrator.migrate_user("u-1").await.unwrap_err();
    match err {
        CliError::Api(ApiError::RoleAssignment { role, applied, .. }) => {
            assert_eq!(role, "user");
            assert!(applied.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }

    env.destination.verify().await;
    Ok(())
}
