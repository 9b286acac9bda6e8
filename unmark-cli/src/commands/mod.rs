//! CLI command implementations.
//!
//! - [`init`] - write a default configuration file
//! - [`run`] - process all pending records

pub mod init;
pub mod run;
