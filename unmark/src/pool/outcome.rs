//! Per-job outcome types.

use crate::records::RecordError;
use crate::storage::StoreError;
use crate::transform::TransformError;
use thiserror::Error;

/// Why a job was abandoned before its artifact was stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("upload failed: {0}")]
    Store(#[from] StoreError),

    /// A collaborator panicked; the panic was contained at the job boundary
    #[error("job panicked: {0}")]
    Panicked(String),
}

/// Terminal result of processing one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Artifact stored and record updated.
    Updated { url: String },
    /// Artifact stored but the record write failed. The artifact is orphaned.
    StoredWithoutUpdate { url: String, error: RecordError },
    /// Nothing was stored and the record is untouched.
    Failed(JobError),
}

impl JobOutcome {
    /// Whether the job got far enough to store an artifact.
    pub fn is_processed(&self) -> bool {
        !matches!(self, JobOutcome::Failed(_))
    }

    /// URL of the stored artifact, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            JobOutcome::Updated { url } | JobOutcome::StoredWithoutUpdate { url, .. } => {
                Some(url)
            }
            JobOutcome::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let updated = JobOutcome::Updated {
            url: "https://b.s3.r.amazonaws.com/images/k".to_string(),
        };
        assert!(updated.is_processed());
        assert_eq!(updated.url(), Some("https://b.s3.r.amazonaws.com/images/k"));

        let orphaned = JobOutcome::StoredWithoutUpdate {
            url: "https://x".to_string(),
            error: RecordError::NotFound("a".to_string()),
        };
        assert!(orphaned.is_processed());
        assert_eq!(orphaned.url(), Some("https://x"));

        let failed = JobOutcome::Failed(JobError::Panicked("boom".to_string()));
        assert!(!failed.is_processed());
        assert_eq!(failed.url(), None);
    }

    #[test]
    fn test_job_error_from_stage_errors() {
        let err: JobError = TransformError::EmptyReference.into();
        assert!(err.to_string().starts_with("transform failed"));

        let err: JobError = StoreError::InvalidLocation("bucket is empty".to_string()).into();
        assert!(err.to_string().contains("bucket is empty"));
    }
}
