//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Maximum number of response body bytes kept in error diagnostics.
pub const BODY_SNIPPET_LIMIT: usize = 512;

/// Errors returned by [`AsyncHttpClient`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The HTTP client itself could not be built
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// Connection, timeout or body read failure
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Server answered with a status outside [200, 300)
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
}

/// Renders at most [`BODY_SNIPPET_LIMIT`] bytes of a response body as text.
pub fn body_snippet(body: &[u8]) -> String {
    let end = body.len().min(BODY_SNIPPET_LIMIT);
    String::from_utf8_lossy(&body[..end]).into_owned()
}

/// Trait for asynchronous HTTP client operations.
///
/// Only the single call the transform service needs is exposed, which keeps
/// mock implementations trivial.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP POST request with a JSON body.
    ///
    /// Returns the full response body on a 2xx status.
    fn post_json(
        &self,
        url: &str,
        json_body: String,
    ) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

/// Default request timeout. The transform service can be slow on large images.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

impl AsyncReqwestClient {
    /// Creates a new client with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new client with a custom request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn post_json(&self, url: &str, json_body: String) -> Result<Vec<u8>, HttpError> {
        trace!(url = url, bytes = json_body.len(), "HTTP POST request starting");

        let response = match self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(json_body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(HttpError::Transport {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        debug!(url = url, status = status.as_u16(), "HTTP response received");

        if !status.is_success() {
            warn!(url = url, status = status.as_u16(), "HTTP error status");
            // A failed body read keeps the status and drops the snippet.
            let body = match response.bytes().await {
                Ok(body) => body_snippet(&body),
                Err(e) => {
                    warn!(url = url, error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|e| HttpError::Transport {
            url: url.to_string(),
            message: format!("failed to read response: {}", e),
        })?;

        trace!(url = url, bytes = body.len(), "HTTP response body read");
        Ok(body.to_vec())
    }
}
