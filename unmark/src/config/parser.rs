//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::{MAX_WORKERS, MIN_WORKERS};
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [mongo] section
    if let Some(section) = ini.section(Some("mongo")) {
        if let Some(v) = non_empty(section, "mongo", "uri")? {
            if !v.starts_with("mongodb://") && !v.starts_with("mongodb+srv://") {
                return Err(invalid(
                    "mongo",
                    "uri",
                    &v,
                    "must start with mongodb:// or mongodb+srv://",
                ));
            }
            config.mongo.uri = v;
        }
        if let Some(v) = non_empty(section, "mongo", "database")? {
            config.mongo.database = v;
        }
        if let Some(v) = non_empty(section, "mongo", "collection")? {
            config.mongo.collection = v;
        }
        if let Some(v) = non_empty(section, "mongo", "source_field")? {
            config.mongo.source_field = v;
        }
        if let Some(v) = non_empty(section, "mongo", "result_field")? {
            config.mongo.result_field = v;
        }
        if let Some(v) = section.get("query_limit") {
            config.mongo.query_limit = parse_positive(v, "mongo", "query_limit")?;
        }
    }

    // [s3] section
    if let Some(section) = ini.section(Some("s3")) {
        // An empty bucket is allowed here; `unmark run` refuses to start without one
        if let Some(v) = section.get("bucket") {
            config.s3.bucket = v.trim().to_string();
        }
        if let Some(v) = non_empty(section, "s3", "region")? {
            config.s3.region = v;
        }
        if let Some(v) = section.get("key_prefix") {
            config.s3.key_prefix = v.trim().trim_matches('/').to_string();
        }
    }

    // [transform] section
    if let Some(section) = ini.section(Some("transform")) {
        if let Some(v) = non_empty(section, "transform", "endpoint")? {
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(invalid(
                    "transform",
                    "endpoint",
                    &v,
                    "must be an http:// or https:// URL",
                ));
            }
            config.transform.endpoint = v;
        }
        if let Some(v) = section.get("timeout_secs") {
            config.transform.timeout_secs = parse_positive(v, "transform", "timeout_secs")?;
        }
    }

    // [pool] section
    if let Some(section) = ini.section(Some("pool")) {
        if let Some(v) = section.get("workers") {
            let workers: usize = parse_positive(v, "pool", "workers")?;
            if !(MIN_WORKERS..=MAX_WORKERS).contains(&workers) {
                return Err(invalid(
                    "pool",
                    "workers",
                    v,
                    &format!("must be between {} and {}", MIN_WORKERS, MAX_WORKERS),
                ));
            }
            config.pool.workers = workers;
        }
        if let Some(v) = section.get("queue_capacity") {
            config.pool.queue_capacity = parse_positive(v, "pool", "queue_capacity")?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "logging", "file")? {
            config.logging.file = expand_tilde(&v);
        }
    }

    Ok(config)
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Reads a key that must not be blank when present.
fn non_empty(
    section: &Properties,
    section_name: &str,
    key: &str,
) -> Result<Option<String>, ConfigFileError> {
    match section.get(key) {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Err(invalid(section_name, key, v, "must not be empty")),
        Some(v) => Ok(Some(v.trim().to_string())),
    }
}

fn parse_positive<T>(value: &str, section: &str, key: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(invalid(section, key, value, "must be a positive integer")),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
