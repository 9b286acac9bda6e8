//! Default values and limits for all configuration settings.

use super::file::config_directory;
use super::settings::*;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_MONGO_DATABASE: &str = "unmark";
pub const DEFAULT_MONGO_COLLECTION: &str = "projects";
pub const DEFAULT_SOURCE_FIELD: &str = "temp_link";
pub const DEFAULT_RESULT_FIELD: &str = "psf_images";
pub const DEFAULT_QUERY_LIMIT: u64 = 50_000;

pub const DEFAULT_S3_REGION: &str = "ap-south-1";
pub const DEFAULT_KEY_PREFIX: &str = "images";

pub const DEFAULT_TRANSFORM_ENDPOINT: &str = "http://127.0.0.1:4000/remove-watermark";
pub const DEFAULT_TRANSFORM_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_WORKERS: usize = 100;
pub const MIN_WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 1024;
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

pub const DEFAULT_LOG_FILE_NAME: &str = "unmark.log";

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGO_URI.to_string(),
            database: DEFAULT_MONGO_DATABASE.to_string(),
            collection: DEFAULT_MONGO_COLLECTION.to_string(),
            source_field: DEFAULT_SOURCE_FIELD.to_string(),
            result_field: DEFAULT_RESULT_FIELD.to_string(),
            query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: DEFAULT_S3_REGION.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSFORM_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TRANSFORM_TIMEOUT_SECS,
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: config_directory().join(DEFAULT_LOG_FILE_NAME),
        }
    }
}
