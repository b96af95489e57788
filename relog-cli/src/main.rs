//! relog command-line entry point.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::Path;

use clap::Parser;
use tracing::{error, warn};

use relog_core::config::RelogConfig;
use relog_core::error::{ConfigError, RelogError};

use crate::cli::{Cli, Commands, ConfigAction};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    let loaded = load_config(&cli.config, cli.log_level.as_deref());

    let mut general = loaded
        .as_ref()
        .map(|(config, _)| config.general.clone())
        .unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let writer = OutputWriter::new(cli.output);

    let result = match loaded {
        Ok((config, missing)) => {
            if missing {
                warn!(path = %cli.config.display(), "config file not found, using defaults");
            }
            dispatch(cli.command, &cli.config, &config, &writer)
        }
        // `config validate` reports load errors itself.
        Err(_) if is_validate(&cli.command) => {
            dispatch(cli.command, &cli.config, &RelogConfig::default(), &writer)
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Load the effective configuration.
///
/// A missing file falls back to defaults plus env overrides; the flag is
/// returned so the caller can warn once logging is up. Any other failure
/// is a configuration error.
fn load_config(path: &Path, log_level: Option<&str>) -> Result<(RelogConfig, bool), CliError> {
    let (mut config, missing) = match RelogConfig::load(path) {
        Ok(config) => (config, false),
        Err(RelogError::Config(ConfigError::FileNotFound { .. })) => {
            let mut config = RelogConfig::default();
            config.apply_env_overrides();
            (config, true)
        }
        Err(e) => return Err(CliError::Config(e.to_string())),
    };

    if let Some(level) = log_level {
        config.general.log_level = level.to_owned();
    }
    config
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok((config, missing))
}

fn is_validate(command: &Commands) -> bool {
    matches!(command, Commands::Config(args) if matches!(args.action, ConfigAction::Validate))
}

fn dispatch(
    command: Commands,
    config_path: &Path,
    config: &RelogConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match command {
        Commands::Ingest(args) => commands::ingest::execute(args, config, writer),
        Commands::Check(args) => commands::check::execute(args, config, writer),
        Commands::Config(args) => commands::config::execute(args, config_path, config, writer),
    }
}
