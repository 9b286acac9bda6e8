//! Job enumeration.

use super::types::{JobDescriptor, Record, RecordError};
use crate::log::Logger;
use crate::{log_error, log_warn};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Stream of records read from a store cursor.
///
/// `Err(RecordError::Decode)` items mark single bad records; any other error
/// means the cursor itself broke.
pub type RecordStream = BoxStream<'static, Result<Record, RecordError>>;

/// Store-side query for records that have no result yet.
pub trait RecordSource: Send + Sync {
    /// Opens a cursor over records whose result field is empty, in store
    /// order, returning at most `limit` of them.
    fn pending_records(
        &self,
        limit: u64,
    ) -> impl Future<Output = Result<RecordStream, RecordError>> + Send;
}

/// Job descriptors from one enumeration, with that enumeration's skip count.
pub struct Enumeration {
    jobs: BoxStream<'static, JobDescriptor>,
    skipped: Arc<AtomicU64>,
}

impl Enumeration {
    /// Number of records this enumeration has skipped so far because they
    /// failed to decode.
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }
}

impl Stream for Enumeration {
    type Item = JobDescriptor;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.jobs.poll_next_unpin(cx)
    }
}

/// Converts pending records into job descriptors.
pub struct JobSource<R> {
    source: R,
    logger: Arc<dyn Logger>,
}

impl<R: RecordSource> JobSource<R> {
    pub fn new(source: R, logger: Arc<dyn Logger>) -> Self {
        Self { source, logger }
    }

    /// Enumerates up to `max` pending records as job descriptors.
    ///
    /// The returned stream is lazy and forward-only. Records that fail to
    /// decode are logged and skipped. A cursor failure ends the stream.
    /// Failing to open the cursor is returned as an error.
    pub async fn enumerate(&self, max: u64) -> Result<Enumeration, RecordError> {
        let records = self.source.pending_records(max).await?;
        let logger = Arc::clone(&self.logger);
        let skipped = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&skipped);

        let jobs = stream::unfold(Some(records), move |state| {
            let logger = Arc::clone(&logger);
            let skipped = Arc::clone(&counter);
            async move {
                let mut records = state?;
                while let Some(item) = records.next().await {
                    match item.and_then(JobDescriptor::try_from) {
                        Ok(job) => return Some((job, Some(records))),
                        Err(RecordError::Decode(reason)) => {
                            skipped.fetch_add(1, Ordering::Relaxed);
                            log_warn!(logger, "Skipping record: {}", reason);
                        }
                        Err(e) => {
                            log_error!(logger, "Record enumeration aborted: {}", e);
                            return None;
                        }
                    }
                }
                None
            }
        });

        Ok(Enumeration {
            jobs: jobs.boxed(),
            skipped,
        })
    }
}
