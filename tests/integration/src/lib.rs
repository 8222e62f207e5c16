//! Integration tests for contenthost against an S3-compatible server.
//!
//! These tests require a running server at `S3_ENDPOINT_URL` (default
//! `http://localhost:4566`) that accepts the `test`/`test` credentials.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p contenthost-integration -- --ignored
//! ```

use std::collections::HashMap;
use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use contenthost_core::StoreConfig;
use contenthost_store::ObjectStoreClient;

static INIT: Once = Once::new();

/// Access key id accepted by the local server.
pub const ACCESS_KEY_ID: &str = "test";

/// Secret access key accepted by the local server.
pub const SECRET_ACCESS_KEY: &str = "test";

/// Region used for signing.
pub const REGION: &str = "us-east-1";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Create an SDK client for bucket setup and verification.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new(
        ACCESS_KEY_ID,
        SECRET_ACCESS_KEY,
        None,
        None,
        "integration-test",
    );

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(REGION))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Store configuration pointing at the local server and the given bucket.
#[must_use]
pub fn store_config(bucket: &str) -> StoreConfig {
    init_tracing();

    let env = HashMap::from([
        ("B2_BUCKET", bucket.to_owned()),
        ("B2_REGION", REGION.to_owned()),
        ("B2_ENDPOINT", endpoint_url()),
        ("B2_KEY_ID", ACCESS_KEY_ID.to_owned()),
        ("B2_APP_KEY", SECRET_ACCESS_KEY.to_owned()),
    ]);
    StoreConfig::from_lookup(|name| env.get(name).cloned())
        .unwrap_or_else(|e| panic!("invalid test configuration: {e}"))
}

/// Presigned store client bound to the given bucket.
#[must_use]
pub fn store_client(bucket: &str) -> ObjectStoreClient {
    ObjectStoreClient::new(&store_config(bucket))
        .unwrap_or_else(|e| panic!("failed to build store client: {e}"))
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket and return its name. Caller is responsible for cleanup.
pub async fn create_test_bucket(client: &aws_sdk_s3::Client, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Delete all objects in a bucket, then delete the bucket.
pub async fn cleanup_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    if let Ok(resp) = client.list_objects_v2().bucket(bucket).send().await {
        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                let _ = client.delete_object().bucket(bucket).key(key).send().await;
            }
        }
    }

    let _ = client.delete_bucket().bucket(bucket).send().await;
}

mod test_delete;
mod test_presign;
