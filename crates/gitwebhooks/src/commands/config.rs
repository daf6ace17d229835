//! Configuration commands.

use std::{fmt::Display, io::Write};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use gitwebhooks_config::{Config, Platform, PlatformConfig};

use super::{Command, CommandContext};
use crate::{config_validator::validate_configuration, Result};

const SECRET_MASK: &str = "********";
const SENSITIVE_KEYWORDS: [&str; 5] = ["secret", "password", "token", "key", "passphrase"];

fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_KEYWORDS.iter().any(|keyword| key.contains(keyword))
}

/// Write a `key = value` line, masking non-empty values of sensitive keys.
fn write_value(out: &mut dyn Write, key: &str, value: impl Display) -> std::io::Result<()> {
    let value = value.to_string();
    if is_sensitive_key(key) && !value.is_empty() {
        writeln!(out, "{} = {}", key, SECRET_MASK)
    } else {
        writeln!(out, "{} = {}", key, value)
    }
}

/// Manage configuration
#[derive(Parser)]
pub(crate) struct ConfigCommand {
    #[clap(subcommand)]
    inner: ConfigSubCommand,
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum ConfigSubCommand {
    Show(ConfigShowCommand),
    Check(ConfigCheckCommand),
}

#[async_trait]
impl Command for ConfigSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Show(sub) => sub.execute(ctx).await,
            Self::Check(sub) => sub.execute(ctx).await,
        }
    }
}

/// Show effective configuration, secrets masked
#[derive(Parser)]
pub(crate) struct ConfigShowCommand;

fn write_platform(out: &mut dyn Write, name: &str, config: &PlatformConfig) -> std::io::Result<()> {
    writeln!(out, "[{}]", name)?;
    write_value(out, "verify", config.verify)?;
    write_value(out, "secret", &config.secret)?;
    write_value(out, "handle_events", config.handle_events.join(", "))
}

fn write_config(out: &mut dyn Write, config: &Config) -> std::io::Result<()> {
    writeln!(out, "# {}", config.path.display())?;
    writeln!(out, "[server]")?;
    write_value(out, "address", &config.server.bind_ip)?;
    write_value(out, "port", config.server.bind_port)?;
    write_value(out, "log_file", &config.logging.log_file)?;

    writeln!(out)?;
    writeln!(out, "[ssl]")?;
    write_value(out, "enable", config.ssl.enabled)?;
    write_value(out, "key_file", &config.ssl.key_file)?;
    write_value(out, "cert_file", &config.ssl.cert_file)?;

    let snapshot = &config.snapshot;
    for platform in Platform::ALL {
        writeln!(out)?;
        write_platform(out, platform.section_name(), snapshot.platform(platform))?;
    }

    let custom = &snapshot.custom;
    write_value(out, "header_name", &custom.header_name)?;
    write_value(out, "header_value", &custom.header_value)?;
    write_value(out, "header_event", &custom.header_event)?;
    write_value(out, "header_token", &custom.header_token)?;
    write_value(out, "identifier_path", &custom.identifier_path)?;

    let mut names: Vec<_> = snapshot.repositories.keys().collect();
    names.sort();
    for name in names {
        let repository = &snapshot.repositories[name];
        writeln!(out)?;
        writeln!(out, "[{}]", name)?;
        write_value(out, "cwd", repository.cwd.display())?;
        write_value(out, "cmd", &repository.cmd)?;
    }

    Ok(())
}

#[async_trait]
impl Command for ConfigShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let mut writer = ctx.writer.write().await;
        write_config(&mut *writer, &ctx.config)?;

        Ok(())
    }
}

/// Validate configuration
#[derive(Parser)]
pub(crate) struct ConfigCheckCommand;

#[async_trait]
impl Command for ConfigCheckCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let warnings = validate_configuration(&ctx.config)?;

        let mut writer = ctx.writer.write().await;
        for warning in warnings {
            writeln!(writer, "Warning: {}", warning)?;
        }
        writeln!(writer, "Configuration OK.")?;

        Ok(())
    }
}
