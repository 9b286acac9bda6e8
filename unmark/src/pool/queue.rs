//! Bounded, closeable multi-consumer job queue.
//!
//! Built on a tokio bounded channel whose single receiver is shared behind an
//! async mutex, so any number of workers can pull from it.

use crate::records::JobDescriptor;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

/// Returned when pushing into a queue that no longer has consumers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("job queue closed: no workers left to receive {record_id}")]
pub struct QueueClosed {
    pub record_id: String,
}

/// Creates a job queue holding at most `capacity` pending jobs.
///
/// A capacity of zero is raised to one.
pub fn job_queue(capacity: usize) -> (JobSender, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        JobSender { inner: tx },
        JobReceiver {
            inner: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producer side of the job queue.
///
/// Closing consumes the sender, so nothing can be pushed after closure.
#[derive(Debug)]
pub struct JobSender {
    inner: mpsc::Sender<JobDescriptor>,
}

impl JobSender {
    /// Pushes a job, waiting while the queue is full.
    pub async fn send(&self, job: JobDescriptor) -> Result<(), QueueClosed> {
        self.inner.send(job).await.map_err(|e| QueueClosed {
            record_id: e.0.record_id().to_string(),
        })
    }

    /// Number of jobs that can be pushed right now without waiting.
    pub fn available_slots(&self) -> usize {
        self.inner.capacity()
    }

    /// Closes the queue. Jobs already queued are still delivered.
    pub fn close(self) {
        drop(self);
    }
}

/// Consumer side of the job queue. Clones share the same queue.
#[derive(Debug, Clone)]
pub struct JobReceiver {
    inner: Arc<Mutex<mpsc::Receiver<JobDescriptor>>>,
}

impl JobReceiver {
    /// Takes the next job.
    ///
    /// Waits while the queue is empty and open; returns `None` once it is
    /// closed and drained.
    pub async fn recv(&self) -> Option<JobDescriptor> {
        self.inner.lock().await.recv().await
    }
}
