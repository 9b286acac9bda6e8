//! Transform service client.

use super::http::{AsyncHttpClient, HttpError};
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

/// Errors from a single transform call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("source reference is empty")]
    EmptyReference,

    #[error("failed to encode transform request: {0}")]
    Encode(String),

    #[error("transform service unreachable: {0}")]
    Transport(String),

    #[error("transform service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<HttpError> for TransformError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Status { status, body, .. } => TransformError::Status { status, body },
            other => TransformError::Transport(other.to_string()),
        }
    }
}

/// Exchanges a source image reference for transformed image bytes.
pub trait Transformer: Send + Sync {
    fn transform(
        &self,
        source_reference: &str,
    ) -> impl Future<Output = Result<Vec<u8>, TransformError>> + Send;
}

#[derive(Serialize)]
struct TransformRequest<'a> {
    image_url: &'a str,
}

/// [`Transformer`] backed by the watermark removal HTTP service.
///
/// One POST per call, no retries.
pub struct TransformClient<H> {
    http: H,
    endpoint: String,
}

impl<H: AsyncHttpClient> TransformClient<H> {
    pub fn new(http: H, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl<H: AsyncHttpClient> Transformer for TransformClient<H> {
    async fn transform(&self, source_reference: &str) -> Result<Vec<u8>, TransformError> {
        if source_reference.trim().is_empty() {
            return Err(TransformError::EmptyReference);
        }

        let body = serde_json::to_string(&TransformRequest {
            image_url: source_reference,
        })
        .map_err(|e| TransformError::Encode(e.to_string()))?;

        let bytes = self.http.post_json(&self.endpoint, body).await?;
        Ok(bytes)
    }
}
