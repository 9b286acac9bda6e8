//! Remote transform service client.
//!
//! The transform service removes the watermark from a source image. It is
//! called once per job with the image reference and answers with the
//! transformed image bytes.
//!
//! ```ignore
//! use unmark::transform::{AsyncReqwestClient, TransformClient, Transformer};
//!
//! let http = AsyncReqwestClient::with_timeout(60)?;
//! let client = TransformClient::new(http, "http://127.0.0.1:4000/remove-watermark");
//! let bytes = client.transform("https://example.com/photo.jpg").await?;
//! ```

mod client;
mod http;

pub use client::{TransformClient, TransformError, Transformer};
pub use http::{body_snippet, AsyncHttpClient, AsyncReqwestClient, HttpError, BODY_SNIPPET_LIMIT};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
