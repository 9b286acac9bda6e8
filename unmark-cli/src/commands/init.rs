//! `unmark init`: write a commented default config file.

use crate::error::CliError;
use clap::Args;
use std::path::{Path, PathBuf};
use unmark::config::{config_file_path, ConfigFile};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub fn run(config_path: Option<PathBuf>, args: InitArgs) -> Result<(), CliError> {
    let path = config_path.unwrap_or_else(config_file_path);
    write_default(&path, args.force)?;

    println!("Wrote default configuration to {}", path.display());
    println!("Set [s3] bucket before running `unmark run`.");
    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }
    ConfigFile::default().save_to(path)?;
    Ok(())
}
