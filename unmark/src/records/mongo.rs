//! MongoDB record store.

use super::source::{RecordSource, RecordStream};
use super::types::{Record, RecordError};
use super::updater::RecordUpdater;
use crate::config::MongoSettings;
use futures::StreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};
use tracing::{debug, info};

/// Field names used to read and update records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    /// Field holding the source image reference
    pub source: String,
    /// Array field holding result URLs; empty means pending
    pub result: String,
}

impl RecordFields {
    pub fn new(source: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            result: result.into(),
        }
    }
}

/// Record store backed by a MongoDB collection.
///
/// Cloning is cheap; all clones share the driver's connection pool.
#[derive(Clone)]
pub struct MongoRecordStore {
    collection: Collection<Document>,
    fields: RecordFields,
}

impl MongoRecordStore {
    pub fn new(collection: Collection<Document>, fields: RecordFields) -> Self {
        Self { collection, fields }
    }

    /// Connects to MongoDB and verifies the server answers a ping.
    ///
    /// An unreachable server is reported as [`RecordError::Store`]; callers
    /// treat it as fatal.
    pub async fn connect(settings: &MongoSettings) -> Result<Self, RecordError> {
        let client = Client::with_uri_str(&settings.uri)
            .await
            .map_err(|e| RecordError::Store(format!("failed to connect: {}", e)))?;

        let database = client.database(&settings.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RecordError::Store(format!("ping failed: {}", e)))?;

        info!(
            database = %settings.database,
            collection = %settings.collection,
            "Connected to MongoDB"
        );

        Ok(Self::new(
            database.collection(&settings.collection),
            RecordFields::new(&settings.source_field, &settings.result_field),
        ))
    }

    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }
}

/// Decodes a raw document into a [`Record`].
///
/// `_id` must be an ObjectId and the source field a string. A missing result
/// field reads as an empty list.
pub fn decode_record(document: &Document, fields: &RecordFields) -> Result<Record, RecordError> {
    let id = document
        .get_object_id("_id")
        .map_err(|e| RecordError::Decode(format!("_id: {}", e)))?
        .to_hex();

    let source_reference = document
        .get_str(&fields.source)
        .map_err(|e| RecordError::Decode(format!("record {}: {}: {}", id, fields.source, e)))?
        .to_string();

    let result_references = match document.get(&fields.result) {
        None | Some(Bson::Null) => Vec::new(),
        Some(Bson::Array(values)) => values
            .iter()
            .map(|value| {
                value.as_str().map(str::to_string).ok_or_else(|| {
                    RecordError::Decode(format!(
                        "record {}: {} contains a non-string value",
                        id, fields.result
                    ))
                })
            })
            .collect::<Result<_, _>>()?,
        Some(other) => {
            return Err(RecordError::Decode(format!(
                "record {}: {} is {:?}, expected an array",
                id,
                fields.result,
                other.element_type()
            )))
        }
    };

    Ok(Record {
        id,
        source_reference,
        result_references,
    })
}

impl RecordSource for MongoRecordStore {
    async fn pending_records(&self, limit: u64) -> Result<RecordStream, RecordError> {
        let mut filter = Document::new();
        filter.insert(self.fields.result.as_str(), doc! { "$size": 0 });
        debug!(filter = %filter, limit = limit, "Querying pending records");

        let cursor = self
            .collection
            .find(filter)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await
            .map_err(|e| RecordError::Store(format!("query failed: {}", e)))?;

        let fields = self.fields.clone();
        let records = cursor.map(move |item| match item {
            Ok(document) => decode_record(&document, &fields),
            Err(e) => Err(RecordError::Store(format!("cursor failed: {}", e))),
        });

        Ok(records.boxed())
    }
}

impl RecordUpdater for MongoRecordStore {
    async fn apply(&self, record_id: &str, result_urls: &[String]) -> Result<(), RecordError> {
        let object_id = ObjectId::parse_str(record_id).map_err(|e| RecordError::InvalidId {
            id: record_id.to_string(),
            reason: e.to_string(),
        })?;

        let mut set = Document::new();
        set.insert(self.fields.result.as_str(), result_urls.to_vec());

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, doc! { "$set": set })
            .await
            .map_err(|e| RecordError::Store(format!("update of {} failed: {}", record_id, e)))?;

        if result.matched_count == 0 {
            return Err(RecordError::NotFound(record_id.to_string()));
        }
        Ok(())
    }
}
