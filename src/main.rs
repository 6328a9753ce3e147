use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use grid_route::adapters::outbound::{init_combined_logger, init_tracing_logger, FilesystemTableStore};
use grid_route::application::RoutePipelineService;
use grid_route::Config;

/// Picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(name = "grid-route")]
#[command(about = "Merge grid map tables and find the shortest route between named cells", long_about = None)]
struct Cli {
    /// Stage to run; both stages run when omitted
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Validate the input tables and write the merged table
    Merge,
    /// Find the route on the persisted merged table
    Route,
    /// Merge, then route
    All,
}

fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG);
        default.exists().then_some(default)
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // usage errors exit with 2 inside clap
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_file = config_path(cli.config);
    let config = Config::load(config_file.as_deref()).context("loading configuration")?;
    info!(
        config = ?config_file,
        data_dir = %config.data_dir().display(),
        output_dir = %config.output_dir().display(),
        "Configuration loaded"
    );

    let logger = match &config.logging.file {
        Some(path) => init_combined_logger(path),
        None => init_tracing_logger(),
    };

    let store = Arc::new(FilesystemTableStore::new(&config));
    let service = RoutePipelineService::new(store.clone(), store, logger);

    match cli.command.unwrap_or(Command::All) {
        Command::Merge => {
            service.run_merge(&config.route)?;
        }
        Command::Route => {
            service.run_route(&config.route)?;
        }
        Command::All => {
            service.run_all(&config.route)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_without_config() {
        let cli = Cli::try_parse_from(["grid-route"]).unwrap();
        assert_eq!(cli.command.unwrap_or(Command::All), Command::All);
        assert!(cli.config.is_none());
    }

    #[test]
    fn reads_command_and_config() {
        let cli = Cli::try_parse_from(["grid-route", "route", "--config", "grid.toml"]).unwrap();
        assert_eq!(cli.command, Some(Command::Route));
        assert_eq!(cli.config, Some(PathBuf::from("grid.toml")));

        let cli = Cli::try_parse_from(["grid-route", "-c", "grid.toml", "merge"]).unwrap();
        assert_eq!(cli.command, Some(Command::Merge));
        assert_eq!(cli.config, Some(PathBuf::from("grid.toml")));
    }

    #[test]
    fn rejects_unknown_arguments() {
        let err = Cli::try_parse_from(["grid-route", "draw"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(Cli::try_parse_from(["grid-route", "--config"]).is_err());
    }

    #[test]
    fn falls_back_to_config_in_working_directory() {
        // unit tests run from the package root, next to config.toml
        assert_eq!(config_path(None), Some(PathBuf::from(DEFAULT_CONFIG)));
        assert_eq!(
            config_path(Some(PathBuf::from("other.toml"))),
            Some(PathBuf::from("other.toml"))
        );
    }
}
