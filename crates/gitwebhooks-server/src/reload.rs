//! Configuration reload.

use std::sync::Arc;

use gitwebhooks_config::{Config, ConfigError, SharedSnapshot};
use tracing::{error, info};

/// Re-read the configuration file and swap the snapshot.
///
/// On failure the current snapshot stays in place.
pub fn reload_snapshot(config: &Config, snapshot: &SharedSnapshot) -> Result<usize, ConfigError> {
    let next = config.reload_snapshot()?;
    let count = next.repositories.len();
    snapshot.replace(next);

    Ok(count)
}

/// Reload the configuration each time the process receives `SIGHUP`.
#[cfg(unix)]
pub async fn watch_reload_signal(config: Config, snapshot: Arc<SharedSnapshot>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(e) => {
            error!(error = %e, "Could not listen for SIGHUP, reload disabled");
            return;
        }
    };

    while hangup.recv().await.is_some() {
        info!(path = %config.path.display(), "Reloading configuration");
        match reload_snapshot(&config, &snapshot) {
            Ok(count) => info!(repositories = count, "Configuration reloaded"),
            Err(e) => error!(error = %e, "Configuration reload failed, keeping previous configuration"),
        }
    }
}

/// Reload the configuration each time the process receives `SIGHUP`.
#[cfg(not(unix))]
pub async fn watch_reload_signal(_config: Config, _snapshot: Arc<SharedSnapshot>) {
    info!("Configuration reload on signal is not supported on this platform");
}
