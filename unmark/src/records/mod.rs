//! Record store access.
//!
//! Records are the unit of work: each one points at a source image and,
//! once processed, carries the URL of its transformed artifact.
//!
//! - [`JobSource`] turns pending records into [`JobDescriptor`]s
//! - [`RecordUpdater`] writes the result URL back onto a record
//! - [`MongoRecordStore`] implements both store-facing traits for MongoDB
//! - [`InMemoryRecordStore`] implements them in memory

mod memory;
mod mongo;
mod source;
mod types;
mod updater;

pub use memory::InMemoryRecordStore;
pub use mongo::{decode_record, MongoRecordStore, RecordFields};
pub use source::{Enumeration, JobSource, RecordSource, RecordStream};
pub use types::{JobDescriptor, Record, RecordError};
pub use updater::RecordUpdater;
