//! Config module.

mod errors;
pub mod loader;
mod platform;
mod snapshot;

use std::{
    env,
    path::{Path, PathBuf},
};

use ini::Ini;

pub use self::{
    errors::{ConfigError, Result},
    platform::Platform,
    snapshot::{
        ConfigSnapshot, CustomPlatformConfig, PlatformConfig, RepositoryConfig, SharedSnapshot,
    },
};

/// Configuration file locations, by priority: user, local, system.
pub const CONFIG_SEARCH_PATHS: [&str; 3] = [
    "~/.gitwebhooks.ini",
    "/usr/local/etc/gitwebhooks.ini",
    "/etc/gitwebhooks.ini",
];

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = CONFIG_SEARCH_PATHS[0];

const DEFAULT_BIND_IP: &str = "0.0.0.0";
const DEFAULT_BIND_PORT: u16 = 6789;
const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Maximum accepted request body size (in bytes).
    pub max_body_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
    /// Log file path (empty = console only).
    pub log_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslConfig {
    /// TLS requested.
    pub enabled: bool,
    /// Private key file.
    pub key_file: String,
    /// Certificate file.
    pub cert_file: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Configuration file path.
    pub path: PathBuf,
    /// Server options.
    pub server: ServerConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// TLS options.
    pub ssl: SslConfig,
    /// Platforms and repositories, as loaded at startup.
    pub snapshot: ConfigSnapshot,
    /// App version
    pub version: String,
}

impl Config {
    /// Load configuration from a file, applying environment overrides.
    pub fn load(path: &Path, version: String) -> Result<Config> {
        let ini = loader::load_file(path)?;
        Self::from_ini(path, &ini, version)
    }

    /// Build configuration from parsed INI contents.
    pub fn from_ini(path: &Path, ini: &Ini, version: String) -> Result<Config> {
        let port = loader::get_str(ini, "server", "port", &DEFAULT_BIND_PORT.to_string());
        let bind_port = port
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or(ConfigError::InvalidPort { value: port })?;

        Ok(Config {
            path: path.to_path_buf(),
            server: ServerConfig {
                bind_ip: loader::get_str(ini, "server", "address", DEFAULT_BIND_IP),
                bind_port,
                workers_count: env_to_optional_u16("GITWEBHOOKS_SERVER_WORKERS_COUNT", None),
                max_body_size: env_to_usize(
                    "GITWEBHOOKS_SERVER_MAX_BODY_SIZE",
                    DEFAULT_MAX_BODY_SIZE,
                ),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("GITWEBHOOKS_LOGGING_USE_BUNYAN", false),
                log_file: loader::get_str(ini, "server", "log_file", ""),
            },
            ssl: SslConfig {
                enabled: loader::get_bool(ini, "ssl", "enable", false)?,
                key_file: loader::get_str(ini, "ssl", "key_file", ""),
                cert_file: loader::get_str(ini, "ssl", "cert_file", ""),
            },
            snapshot: loader::load_snapshot(ini)?,
            version,
        })
    }

    /// Build configuration from INI text, without a backing file.
    pub fn from_str_no_version(contents: &str) -> Result<Config> {
        let ini = loader::load_str(contents)?;
        Self::from_ini(Path::new(""), &ini, "0.0.0".into())
    }

    /// Re-read platforms and repositories from the configuration file.
    ///
    /// Repositories with an empty `cwd` or `cmd` fail the reload.
    pub fn reload_snapshot(&self) -> Result<ConfigSnapshot> {
        let snapshot = loader::load_snapshot_from_file(&self.path)?;
        snapshot.validate()?;

        Ok(snapshot)
    }
}

/// Configuration path from environment, or the first existing search path.
pub fn default_config_path() -> PathBuf {
    match env::var("GITWEBHOOKS_CONFIG") {
        Ok(path) => expand_home(&path),
        Err(_) => locate_config_file(&CONFIG_SEARCH_PATHS.map(expand_home)),
    }
}

/// First candidate that is an existing file.
///
/// Falls back to the first candidate so a missing file is reported there.
pub fn locate_config_file(candidates: &[PathBuf]) -> PathBuf {
    candidates
        .iter()
        .find(|path| path.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| expand_home(DEFAULT_CONFIG_PATH))
}

/// Expand a leading `~/` using `HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = env::var("HOME") {
            return Path::new(&home).join(rest);
        }
    }

    PathBuf::from(path)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}
