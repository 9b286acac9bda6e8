//! Bounded worker pool driving the per-record pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   JobSender    ┌─────────────┐   JobReceiver (shared)
//! │  JobSource   │ ─────────────► │  job queue  │ ───────────┬──────────┐
//! │  (producer)  │  send() waits  │  (bounded)  │            ▼          ▼
//! └──────────────┘  when full     └─────────────┘        worker 1 … worker N
//!                                                            │
//!                                                            ▼
//!                                          JobPipeline::process(job)
//!                                  transform → key → store → update record
//! ```
//!
//! Workers pull one job at a time and run it to completion before pulling the
//! next. A failed job is logged and abandoned; it never stops its worker.
//! [`WorkerPool::run`] returns once the queue is closed, drained, and every
//! worker has finished its in-flight job.

mod outcome;
mod pipeline;
mod queue;
mod stats;
mod worker;

pub use outcome::{JobError, JobOutcome};
pub use pipeline::JobPipeline;
pub use queue::{job_queue, JobReceiver, JobSender, QueueClosed};
pub use stats::{RunReport, RunStats};
pub use worker::WorkerPool;
