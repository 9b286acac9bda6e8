//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::defaults::{MAX_WORKERS, MIN_WORKERS};
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[mongo]
; Connection string; credentials go inside the URI
uri = {}
database = {}
collection = {}
; Field holding the watermarked source image URL
source_field = {}
; Array field that receives the cleaned image URL.
; Records where this array is empty are processed.
result_field = {}
; Maximum number of records processed per run
query_limit = {}

[s3]
; Destination bucket (required). Objects are uploaded public-read.
; Credentials come from the standard AWS chain (environment, ~/.aws profile).
bucket = {}
region = {}
; Objects are stored as <key_prefix>/<random key>
key_prefix = {}

[transform]
; Watermark removal service, called with POST {{"image_url": "..."}}
endpoint = {}
; Request timeout in seconds
timeout_secs = {}

[pool]
; Number of concurrent workers ({}-{})
workers = {}
; Maximum number of queued jobs waiting for a worker
queue_capacity = {}

[logging]
file = {}
"#,
        config.mongo.uri,
        config.mongo.database,
        config.mongo.collection,
        config.mongo.source_field,
        config.mongo.result_field,
        config.mongo.query_limit,
        config.s3.bucket,
        config.s3.region,
        config.s3.key_prefix,
        config.transform.endpoint,
        config.transform.timeout_secs,
        MIN_WORKERS,
        MAX_WORKERS,
        config.pool.workers,
        config.pool.queue_capacity,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
