//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use gitwebhooks_config::Config;
use tokio::sync::RwLock;

use self::{config::ConfigCommand, server::ServerCommand};
use crate::Result;

mod config;
mod server;

pub(crate) struct CommandContext {
    pub config: Config,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Config(ConfigCommand),
}

impl Default for SubCommand {
    fn default() -> Self {
        Self::Server(ServerCommand)
    }
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Config(sub) => sub.execute(ctx).await,
        }
    }
}
