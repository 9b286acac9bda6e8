//! Record and job descriptor types.

use thiserror::Error;

/// Errors raised while reading or updating records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A single record could not be decoded; enumeration skips it
    #[error("failed to decode record: {0}")]
    Decode(String),

    /// The record identifier is not in the store's native format
    #[error("invalid record id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    #[error("record {0} not found")]
    NotFound(String),

    /// The store itself failed (connection, cursor, write)
    #[error("record store error: {0}")]
    Store(String),
}

/// A record as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub source_reference: String,
    pub result_references: Vec<String>,
}

impl Record {
    /// A record that has not been processed yet.
    pub fn pending(id: impl Into<String>, source_reference: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_reference: source_reference.into(),
            result_references: Vec::new(),
        }
    }
}

/// The in-memory unit of work handed to exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobDescriptor {
    record_id: String,
    source_reference: String,
}

impl JobDescriptor {
    pub fn new(
        record_id: impl Into<String>,
        source_reference: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let record_id = record_id.into();
        let source_reference = source_reference.into();

        if record_id.trim().is_empty() {
            return Err(RecordError::Decode("record id is empty".to_string()));
        }
        if source_reference.trim().is_empty() {
            return Err(RecordError::Decode(format!(
                "record {} has no source reference",
                record_id
            )));
        }

        Ok(Self {
            record_id,
            source_reference,
        })
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn source_reference(&self) -> &str {
        &self.source_reference
    }
}

impl TryFrom<Record> for JobDescriptor {
    type Error = RecordError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        JobDescriptor::new(record.id, record.source_reference)
    }
}
