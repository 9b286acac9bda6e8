//! Artifact storage.
//!
//! Transformed images are written to S3 with public-read access and an
//! attachment disposition. The returned URL is derived from bucket, region
//! and key; no existence check follows the write.

mod content;
mod s3;
mod types;

pub use content::detect_content_type;
pub use s3::S3ArtifactStore;
pub use types::{artifact_url, storage_key, ArtifactStore, StoreError};
