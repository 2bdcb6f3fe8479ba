use async_trait::async_trait;
use aws_config::from_env;
use aws_sdk_s3::{model::ObjectCannedAcl, types::ByteStream, Client, Region as AwsRegion};

use crate::sync::SnapshotStore;

/// Object storage backend for user snapshots.
///
/// Credentials come from the ambient AWS environment. A custom endpoint
/// makes this work against any S3-compatible store.
pub struct S3Store {
    bucket: String,
    client: Client,
}

impl S3Store {
    pub async fn new(region: Option<String>, endpoint: Option<String>, bucket: String) -> Self {
        let mut loader = from_env();
        if let Some(region) = region {
            loader = loader.region(AwsRegion::new(region));
        }
        if let Some(endpoint) = endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        Self { bucket, client: Client::new(&loader.load().await) }
    }
}

#[async_trait]
impl SnapshotStore for S3Store {
    async fn save(&self, key: &str, content: &[u8]) -> eyre::Result<()> {
        tracing::trace!(target: "remote::s3", key, "Uploading object");

        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(content.to_vec()))
            .acl(ObjectCannedAcl::Private)
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::info!(target: "remote::s3", bucket = %self.bucket, key, "Object uploaded");
                Ok(())
            }
            Err(err) => {
                tracing::error!(target: "remote::s3", bucket = %self.bucket, key, %err, "Failed to upload object");
                Err(err.into())
            }
        }
    }
}
