//! unmark CLI - batch watermark removal
//!
//! ```text
//! unmark init                 write ~/.unmark/config.ini with defaults
//! unmark run [--workers N]    process every pending record once
//! ```

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unmark")]
#[command(version = unmark::VERSION)]
#[command(about = "Remove watermarks from stored images and publish the clean copies", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.unmark/config.ini
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every record that has no cleaned image yet
    Run(commands::run::RunArgs),
    /// Write a commented default configuration file
    Init(commands::init::InitArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(cli.config, cli.debug, args).await,
        Commands::Init(args) => commands::init::run(cli.config, args),
    };

    if let Err(e) = result {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::parse_from([
            "unmark",
            "run",
            "--workers",
            "8",
            "--queue-capacity",
            "16",
            "--limit",
            "100",
            "--debug",
        ]);

        assert!(cli.debug);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.workers, Some(8));
                assert_eq!(args.queue_capacity, Some(16));
                assert_eq!(args.limit, Some(100));
            }
            Commands::Init(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["unmark", "init", "--config", "/tmp/unmark.ini", "--force"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/unmark.ini")));
        assert!(matches!(cli.command, Commands::Init(ref a) if a.force));
    }
}
