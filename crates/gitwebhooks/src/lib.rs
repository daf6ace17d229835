//! CLI module.

use anyhow::Result;
use args::{Args, CommandExecutor};
use clap::Parser;
use gitwebhooks_config::{default_config_path, expand_home, Config};
use gitwebhooks_logging::configure_logging;
use shadow_rs::shadow;
use tracing::{info, warn};

pub(crate) mod args;
mod commands;
mod config_validator;
#[cfg(test)]
mod testutils;

shadow!(build);

/// Get version data.
pub fn get_version_data() -> String {
    format!(
        "{} {} (commit {} - {})",
        build::PROJECT_NAME,
        build::PKG_VERSION,
        build::COMMIT_HASH,
        build::COMMIT_DATE_3339
    )
}

/// Initialize command line.
pub fn initialize_command_line() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let path = args
        .config
        .as_deref()
        .map(expand_home)
        .unwrap_or_else(default_config_path);

    let config = Config::load(&path, env!("CARGO_PKG_VERSION").to_string())?;
    configure_logging(&config)?;

    let warnings = config_validator::validate_configuration(&config)?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    info!("{}", get_version_data());

    CommandExecutor::parse_args(config, args)
}
