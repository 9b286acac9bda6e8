//! Per-job pipeline: transform, store, update.

use super::outcome::{JobError, JobOutcome};
use crate::config::PipelineConfig;
use crate::id::KeyGenerator;
use crate::records::{JobDescriptor, RecordUpdater};
use crate::storage::{storage_key, ArtifactStore};
use crate::transform::Transformer;
use std::slice;
use std::sync::Arc;
use tracing::debug;

/// Runs one job through its stages, strictly in order.
///
/// Each stage only starts if the previous one succeeded. Nothing is retried.
pub struct JobPipeline<T, S, U> {
    transformer: T,
    store: S,
    updater: U,
    keys: Arc<dyn KeyGenerator>,
    config: PipelineConfig,
}

impl<T, S, U> JobPipeline<T, S, U>
where
    T: Transformer,
    S: ArtifactStore,
    U: RecordUpdater,
{
    pub fn new(
        transformer: T,
        store: S,
        updater: U,
        keys: Arc<dyn KeyGenerator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            transformer,
            store,
            updater,
            keys,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes a single job.
    ///
    /// A transform or store failure leaves the record untouched. A failed
    /// record update after a successful store yields
    /// [`JobOutcome::StoredWithoutUpdate`]; the stored artifact is not removed.
    pub async fn process(&self, job: &JobDescriptor) -> JobOutcome {
        let content = match self.transformer.transform(job.source_reference()).await {
            Ok(content) => content,
            Err(e) => return JobOutcome::Failed(JobError::Transform(e)),
        };

        let key = storage_key(self.config.key_prefix(), &self.keys.generate());
        debug!(
            record_id = job.record_id(),
            key = %key,
            bytes = content.len(),
            "Storing artifact"
        );

        let url = match self.store.store(self.config.bucket(), &key, content).await {
            Ok(url) => url,
            Err(e) => return JobOutcome::Failed(JobError::Store(e)),
        };

        match self
            .updater
            .apply(job.record_id(), slice::from_ref(&url))
            .await
        {
            Ok(()) => JobOutcome::Updated { url },
            Err(error) => JobOutcome::StoredWithoutUpdate { url, error },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::records::{InMemoryRecordStore, Record, RecordError};
    use crate::storage::{artifact_url, StoreError};
    use crate::transform::TransformError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Transformer that returns fixed bytes, or always fails.
    #[derive(Clone)]
    pub struct FakeTransformer {
        pub fail: bool,
        pub calls: Arc<AtomicUsize>,
    }

    impl FakeTransformer {
        pub fn ok() -> Self {
            Self {
                fail: false,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl Transformer for FakeTransformer {
        async fn transform(&self, source_reference: &str) -> Result<Vec<u8>, TransformError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TransformError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(format!("clean:{}", source_reference).into_bytes())
        }
    }

    /// Store that records uploads and builds URLs like the S3 store does.
    #[derive(Clone)]
    pub struct FakeStore {
        pub fail: bool,
        pub uploads: Arc<Mutex<Vec<(String, String, Vec<u8>)>>>,
    }

    impl FakeStore {
        pub fn ok() -> Self {
            Self {
                fail: false,
                uploads: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                uploads: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn upload_count(&self) -> usize {
            self.uploads.lock().unwrap().len()
        }
    }

    impl ArtifactStore for FakeStore {
        async fn store(
            &self,
            bucket: &str,
            key: &str,
            content: Vec<u8>,
        ) -> Result<String, StoreError> {
            if self.fail {
                return Err(StoreError::Rejected {
                    key: key.to_string(),
                    message: "access denied".to_string(),
                });
            }
            self.uploads
                .lock()
                .unwrap()
                .push((bucket.to_string(), key.to_string(), content));
            Ok(artifact_url(bucket, "ap-south-1", key))
        }
    }

    /// Key generator returning `k0`, `k1`, ...
    #[derive(Default)]
    pub struct SequentialKeys(pub AtomicUsize);

    impl KeyGenerator for SequentialKeys {
        fn generate(&self) -> String {
            format!("k{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn config() -> PipelineConfig {
        PipelineConfig::new("bucket")
    }

    fn job(id: &str) -> JobDescriptor {
        JobDescriptor::new(id, format!("https://img/{}.png", id)).unwrap()
    }

    #[tokio::test]
    async fn test_full_success_sets_single_url() {
        let records = InMemoryRecordStore::with_records([Record::pending("a", "https://img/a.png")]);
        let pipeline = JobPipeline::new(
            FakeTransformer::ok(),
            FakeStore::ok(),
            records.clone(),
            Arc::new(SequentialKeys::default()),
            config(),
        );

        let outcome = pipeline.process(&job("a")).await;

        let expected = "https://bucket.s3.ap-south-1.amazonaws.com/images/k0";
        assert_eq!(
            outcome,
            JobOutcome::Updated {
                url: expected.to_string()
            }
        );
        assert_eq!(
            records.get("a").unwrap().result_references,
            vec![expected.to_string()]
        );
        let uploads = pipeline.store.uploads.lock().unwrap();
        assert_eq!(uploads[0].1, "images/k0");
        assert_eq!(uploads[0].2, b"clean:https://img/a.png".to_vec());
    }

    #[tokio::test]
    async fn test_transform_failure_skips_store_and_update() {
        let records = InMemoryRecordStore::with_records([Record::pending("a", "https://img/a.png")]);
        let pipeline = JobPipeline::new(
            FakeTransformer::failing(),
            FakeStore::ok(),
            records.clone(),
            Arc::new(SequentialKeys::default()),
            config(),
        );

        let outcome = pipeline.process(&job("a")).await;

        assert!(matches!(
            outcome,
            JobOutcome::Failed(JobError::Transform(TransformError::Status { status: 500, .. }))
        ));
        assert_eq!(pipeline.store.upload_count(), 0);
        assert_eq!(records.update_count("a"), 0);
    }

    #[tokio::test]
    async fn test_store_failure_skips_update() {
        let records = InMemoryRecordStore::with_records([Record::pending("a", "https://img/a.png")]);
        let pipeline = JobPipeline::new(
            FakeTransformer::ok(),
            FakeStore::failing(),
            records.clone(),
            Arc::new(SequentialKeys::default()),
            config(),
        );

        let outcome = pipeline.process(&job("a")).await;

        assert!(matches!(
            outcome,
            JobOutcome::Failed(JobError::Store(StoreError::Rejected { .. }))
        ));
        assert_eq!(pipeline.transformer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(records.update_count("a"), 0);
        assert!(records.get("a").unwrap().result_references.is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_keeps_url() {
        // Record was never inserted, so the update finds nothing
        let records = InMemoryRecordStore::new();
        let pipeline = JobPipeline::new(
            FakeTransformer::ok(),
            FakeStore::ok(),
            records,
            Arc::new(SequentialKeys::default()),
            config(),
        );

        let outcome = pipeline.process(&job("gone")).await;

        match outcome {
            JobOutcome::StoredWithoutUpdate { url, error } => {
                assert!(url.ends_with("/images/k0"));
                assert_eq!(error, RecordError::NotFound("gone".to_string()));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(pipeline.store.upload_count(), 1);
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let pipeline = JobPipeline::new(
            FakeTransformer::ok(),
            FakeStore::ok(),
            InMemoryRecordStore::with_records([Record::pending("a", "u")]),
            Arc::new(SequentialKeys::default()),
            PipelineConfig::new("bucket").with_key_prefix("clean/v2"),
        );

        let outcome = pipeline.process(&job("a")).await;
        assert_eq!(
            outcome.url(),
            Some("https://bucket.s3.ap-south-1.amazonaws.com/clean/v2/k0")
        );
    }
}
