//! Record update trait.

use super::types::RecordError;
use std::future::Future;

/// Writes a job's result back onto its originating record.
///
/// Implementations perform a targeted field update scoped to the record id,
/// never a whole-document rewrite. There is no optimistic concurrency check.
pub trait RecordUpdater: Send + Sync {
    fn apply(
        &self,
        record_id: &str,
        result_urls: &[String],
    ) -> impl Future<Output = Result<(), RecordError>> + Send;
}
