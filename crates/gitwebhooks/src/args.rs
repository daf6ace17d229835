use std::sync::Arc;

use clap::Parser;
use gitwebhooks_config::Config;
use tokio::sync::RwLock;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = "Git webhook receiver", long_about = None)]
pub struct Args {
    /// Configuration file (defaults to the first existing ~/.gitwebhooks.ini, /usr/local/etc/gitwebhooks.ini or /etc/gitwebhooks.ini)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    cmd: Option<SubCommand>,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let ctx = CommandContext {
                config,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            Self::parse_args_async(args, ctx).await
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        actix_rt::System::with_tokio_rt(|| runtime).block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.unwrap_or_default().execute(ctx).await
    }
}
