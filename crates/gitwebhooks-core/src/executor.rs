//! Deployment command launcher.

use std::process::{ExitStatus, Stdio};

use gitwebhooks_config::RepositoryConfig;
use tokio::process::Command;
use tracing::{error, info, warn};

/// Launches deployment commands.
///
/// `launch` returns as soon as the command is started; its outcome is only logged.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
pub trait DeploymentExecutor: Send + Sync {
    fn launch(&self, repository: &str, config: &RepositoryConfig);
}

/// Runs commands through the system shell.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(cmd: &str) -> Command {
        #[cfg(windows)]
        let mut command = {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(cmd);
            command
        };
        #[cfg(not(windows))]
        let mut command = {
            let mut command = Command::new("sh");
            command.arg("-c").arg(cmd);
            command
        };

        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

fn log_exit(repository: &str, status: ExitStatus) {
    if status.success() {
        info!(repository = %repository, "Deployment command finished");
    } else {
        warn!(repository = %repository, status = %status, "Deployment command failed");
    }
}

impl DeploymentExecutor for ProcessExecutor {
    fn launch(&self, repository: &str, config: &RepositoryConfig) {
        if tokio::runtime::Handle::try_current().is_err() {
            error!(repository = %repository, "Cannot launch deployment command outside of a runtime");
            return;
        }

        let mut command = Self::shell_command(&config.cmd);
        command.current_dir(&config.cwd);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(
                    repository = %repository,
                    cwd = %config.cwd.display(),
                    error = %e,
                    "Could not start deployment command"
                );
                return;
            }
        };

        info!(
            repository = %repository,
            cwd = %config.cwd.display(),
            pid = ?child.id(),
            "Deployment command started"
        );

        let repository = repository.to_owned();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => log_exit(&repository, status),
                Err(e) => warn!(repository = %repository, error = %e, "Could not wait for deployment command"),
            }
        });
    }
}
