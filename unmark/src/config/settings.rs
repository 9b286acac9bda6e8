//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    pub mongo: MongoSettings,
    pub s3: S3Settings,
    pub transform: TransformSettings,
    pub pool: PoolSettings,
    pub logging: LoggingSettings,
}

/// Record store connection and field mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSettings {
    /// Connection string, credentials included
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Field holding the source image URL
    pub source_field: String,
    /// Array field that receives the result URL; empty means pending
    pub result_field: String,
    /// Maximum number of records enumerated per run
    pub query_limit: u64,
}

/// Object store destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Settings {
    /// Target bucket. Required before a run can start.
    pub bucket: String,
    pub region: String,
    /// Key namespace for stored artifacts
    pub key_prefix: String,
}

/// Watermark removal service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSettings {
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Worker pool sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub workers: usize,
    pub queue_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
