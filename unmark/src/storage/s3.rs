//! S3-backed artifact store.

use super::content::detect_content_type;
use super::types::{artifact_url, validate_location, ArtifactStore, StoreError};
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use tracing::{debug, warn};

/// [`ArtifactStore`] writing public-read objects to S3.
///
/// The SDK client is cheap to clone and safe to share across workers.
#[derive(Clone)]
pub struct S3ArtifactStore {
    client: Client,
    region: String,
}

impl S3ArtifactStore {
    /// Creates a store around a pre-built S3 client.
    ///
    /// `region` must match the client's region; it is only used to build
    /// the returned URLs.
    pub fn new(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Creates a store using the standard AWS config chain for credentials
    /// (environment variables, profiles, IMDS) pinned to `region`.
    pub async fn from_env(region: impl Into<String>) -> Self {
        let region = region.into();
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;
        Self::new(Client::new(&config), region)
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl ArtifactStore for S3ArtifactStore {
    async fn store(&self, bucket: &str, key: &str, content: Vec<u8>) -> Result<String, StoreError> {
        validate_location(bucket, key)?;

        let content_type = detect_content_type(&content);
        let content_length = content.len() as i64;
        debug!(
            bucket = bucket,
            key = key,
            bytes = content_length,
            content_type = content_type,
            "Uploading artifact"
        );

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(content))
            .content_length(content_length)
            .content_type(content_type)
            .content_disposition("attachment")
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                warn!(bucket = bucket, key = key, error = %message, "S3 upload failed");
                StoreError::Rejected {
                    key: key.to_string(),
                    message,
                }
            })?;

        Ok(artifact_url(bucket, &self.region, key))
    }
}
