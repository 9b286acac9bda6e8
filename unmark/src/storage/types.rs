//! Storage types and traits

use std::future::Future;
use thiserror::Error;

/// Errors from an artifact write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid storage location: {0}")]
    InvalidLocation(String),

    /// The object store refused or failed the write (auth, quota, network)
    #[error("object store rejected write of {key}: {message}")]
    Rejected { key: String, message: String },
}

/// Persists raw bytes and hands back a publicly resolvable URL.
///
/// Implementations must not return a URL unless the write was acknowledged.
pub trait ArtifactStore: Send + Sync {
    fn store(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;
}

/// Public URL of an S3 object.
pub fn artifact_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}

/// Namespaces a generated key under `prefix`.
pub fn storage_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", prefix, key)
    }
}

/// Rejects empty bucket or key before any network call.
pub(super) fn validate_location(bucket: &str, key: &str) -> Result<(), StoreError> {
    if bucket.trim().is_empty() {
        return Err(StoreError::InvalidLocation("bucket is empty".to_string()));
    }
    if key.trim().is_empty() {
        return Err(StoreError::InvalidLocation("key is empty".to_string()));
    }
    Ok(())
}
