//! Configuration for unmark.
//!
//! User settings live in an INI file at `~/.unmark/config.ini`
//! ([`ConfigFile`]). The run itself consumes two small builder-style structs
//! derived from it, [`PipelineConfig`] and [`PoolConfig`], which are passed
//! explicitly to constructors.
//!
//! # Example
//!
//! ```
//! use unmark::config::{ConfigFile, PipelineConfig, PoolConfig};
//!
//! let file = ConfigFile::default();
//! let pool = PoolConfig::from(&file).with_workers(8);
//! assert_eq!(pool.workers(), 8);
//!
//! let pipeline = PipelineConfig::new("my-bucket").with_key_prefix("clean");
//! assert_eq!(pipeline.key_prefix(), "clean");
//! ```

mod defaults;
mod file;
mod parser;
mod pipeline;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use pipeline::{PipelineConfig, PoolConfig};
pub use settings::{
    ConfigFile, LoggingSettings, MongoSettings, PoolSettings, S3Settings, TransformSettings,
};
