//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use dnssync_provider::{CloudProfiles, DnsCloud, connect};

/// Skip the test when a required environment variable is absent.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert `Option` is `Some` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique record name so parallel or aborted runs don't collide.
pub fn generate_test_record_name(zone: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{zone}", &uuid.to_string()[..8])
}

/// Connected cloud plus the zone the tests operate on.
pub struct TestContext {
    pub cloud: Arc<dyn DnsCloud>,
    pub zone_name: String,
}

impl TestContext {
    /// Build a context from `DNSSYNC_TEST_CLOUDS` (clouds file path),
    /// `DNSSYNC_TEST_CLOUD` (profile name) and `DNSSYNC_TEST_ZONE`.
    pub async fn from_env() -> Option<Self> {
        let clouds_file = PathBuf::from(env::var("DNSSYNC_TEST_CLOUDS").ok()?);
        let cloud_name = env::var("DNSSYNC_TEST_CLOUD").ok()?;
        let zone_name = env::var("DNSSYNC_TEST_ZONE").ok()?;

        let profiles = CloudProfiles::load(&clouds_file).ok()?;
        let profile = profiles.resolve(&cloud_name).ok()?;
        let cloud = connect(&cloud_name, profile).await.ok()?;

        let zone_name = if zone_name.ends_with('.') {
            zone_name
        } else {
            format!("{zone_name}.")
        };

        Some(Self { cloud, zone_name })
    }

    /// Delete every `_test-` record set left behind in the zone.
    pub async fn cleanup_all_test_records(&self, zone_id: &str) {
        if let Ok(record_sets) = self.cloud.list_record_sets(zone_id).await {
            for rs in record_sets {
                if rs.name.starts_with("_test-") {
                    let _ = self.cloud.delete_record_set(zone_id, &rs.id).await;
                }
            }
        }
    }
}
