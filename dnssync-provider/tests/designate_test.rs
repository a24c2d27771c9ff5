//! Designate cloud integration test.
//!
//! Operation mode:
//! ```bash
//! DNSSYNC_TEST_CLOUDS=clouds.json DNSSYNC_TEST_CLOUD=cloud1 DNSSYNC_TEST_ZONE=example.com \
//!     cargo test -p dnssync-provider --test designate_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{TestContext, generate_test_record_name};
use dnssync_provider::{CreateRecordSetRequest, RecordType, UpdateRecordSetRequest};

const REQUIRED_VARS: [&str; 3] = [
    "DNSSYNC_TEST_CLOUDS",
    "DNSSYNC_TEST_CLOUD",
    "DNSSYNC_TEST_ZONE",
];

// ============ Basic Tests ============

#[tokio::test]
#[ignore = "integration test: requires DNSSYNC_TEST_CLOUDS, DNSSYNC_TEST_CLOUD and DNSSYNC_TEST_ZONE"]
async fn test_designate_list_zones() {
    skip_if_no_credentials!(REQUIRED_VARS[0], REQUIRED_VARS[1], REQUIRED_VARS[2]);

    let ctx = require_some!(TestContext::from_env().await, "failed to build test context");
    let zones = require_ok!(ctx.cloud.list_zones().await, "list_zones failed");
    assert!(!zones.is_empty(), "zone listing should not be empty");

    println!("list_zones passed, {} zones", zones.len());
}

#[tokio::test]
#[ignore = "integration test: requires DNSSYNC_TEST_CLOUDS, DNSSYNC_TEST_CLOUD and DNSSYNC_TEST_ZONE"]
async fn test_designate_get_zone() {
    skip_if_no_credentials!(REQUIRED_VARS[0], REQUIRED_VARS[1], REQUIRED_VARS[2]);

    let ctx = require_some!(TestContext::from_env().await, "failed to build test context");
    let zone = require_ok!(ctx.cloud.get_zone(&ctx.zone_name).await, "get_zone failed");
    assert_eq!(zone.name, ctx.zone_name, "zone name mismatch");

    println!("get_zone passed: {} (id {})", zone.name, zone.id);
}

#[tokio::test]
#[ignore = "integration test: requires DNSSYNC_TEST_CLOUDS, DNSSYNC_TEST_CLOUD and DNSSYNC_TEST_ZONE"]
async fn test_designate_get_zone_not_found() {
    skip_if_no_credentials!(REQUIRED_VARS[0], REQUIRED_VARS[1], REQUIRED_VARS[2]);

    let ctx = require_some!(TestContext::from_env().await, "failed to build test context");
    let result = ctx.cloud.get_zone("does-not-exist.invalid.").await;
    assert!(
        matches!(result, Err(dnssync_provider::CloudError::ZoneNotFound { .. })),
        "expected ZoneNotFound, got {result:?}"
    );

    println!("get_zone not-found passed");
}

#[tokio::test]
#[ignore = "integration test: requires DNSSYNC_TEST_CLOUDS, DNSSYNC_TEST_CLOUD and DNSSYNC_TEST_ZONE"]
async fn test_designate_list_record_sets() {
    skip_if_no_credentials!(REQUIRED_VARS[0], REQUIRED_VARS[1], REQUIRED_VARS[2]);

    let ctx = require_some!(TestContext::from_env().await, "failed to build test context");
    let zone = require_ok!(ctx.cloud.get_zone(&ctx.zone_name).await, "get_zone failed");
    let record_sets = require_ok!(
        ctx.cloud.list_record_sets(&zone.id).await,
        "list_record_sets failed"
    );

    // Every zone has at least its apex SOA and NS.
    assert!(
        record_sets
            .iter()
            .any(|rs| rs.record_type == RecordType::Soa),
        "listing should include the apex SOA"
    );
    assert!(
        record_sets.iter().any(|rs| rs.record_type == RecordType::Ns),
        "listing should include the apex NS"
    );

    println!("list_record_sets passed, {} record sets", record_sets.len());
}

// ============ Record Set Lifecycle ============

#[tokio::test]
#[ignore = "integration test: requires DNSSYNC_TEST_CLOUDS, DNSSYNC_TEST_CLOUD and DNSSYNC_TEST_ZONE"]
async fn test_designate_record_set_lifecycle() {
    skip_if_no_credentials!(REQUIRED_VARS[0], REQUIRED_VARS[1], REQUIRED_VARS[2]);

    let ctx = require_some!(TestContext::from_env().await, "failed to build test context");
    let zone = require_ok!(ctx.cloud.get_zone(&ctx.zone_name).await, "get_zone failed");
    let record_name = generate_test_record_name(&ctx.zone_name);

    let created = require_ok!(
        ctx.cloud
            .create_record_set(&CreateRecordSetRequest {
                zone_id: zone.id.clone(),
                name: record_name.clone(),
                record_type: RecordType::Txt,
                ttl: Some(600),
                records: vec!["\"integration-test\"".to_string()],
            })
            .await,
        "create_record_set failed"
    );
    assert_eq!(created.name, record_name);

    let updated = require_ok!(
        ctx.cloud
            .update_record_set(
                &created.id,
                &UpdateRecordSetRequest {
                    zone_id: zone.id.clone(),
                    ttl: Some(300),
                    records: vec!["\"integration-test-updated\"".to_string()],
                },
            )
            .await,
        "update_record_set failed"
    );
    assert_eq!(updated.ttl, Some(300));

    require_ok!(
        ctx.cloud.delete_record_set(&zone.id, &created.id).await,
        "delete_record_set failed"
    );

    println!("record set lifecycle passed: {record_name}");
}

// ============ Cleanup ============

/// Clean up any remaining test records (run manually).
#[tokio::test]
#[ignore = "integration test: requires DNSSYNC_TEST_CLOUDS, DNSSYNC_TEST_CLOUD and DNSSYNC_TEST_ZONE"]
async fn test_designate_cleanup_test_records() {
    skip_if_no_credentials!(REQUIRED_VARS[0], REQUIRED_VARS[1], REQUIRED_VARS[2]);

    let ctx = require_some!(TestContext::from_env().await, "failed to build test context");
    let zone = require_ok!(ctx.cloud.get_zone(&ctx.zone_name).await, "get_zone failed");
    ctx.cleanup_all_test_records(&zone.id).await;

    println!("cleanup passed");
}
