//! Config errors.

use std::path::PathBuf;

use thiserror::Error;

/// Config error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("Could not read config file '{}': {source}", path.display())]
    ReadError { path: PathBuf, source: ini::Error },
    #[error("Could not parse config: {source}")]
    ParseError { source: ini::ParseError },
    #[error("Invalid boolean value '{value}' for '{key}' in section [{section}]")]
    InvalidBoolean {
        section: String,
        key: String,
        value: String,
    },
    #[error("Invalid port number: {value}")]
    InvalidPort { value: String },
    #[error("Empty option '{key}' in repository [{name}]")]
    EmptyRepositoryOption { name: String, key: String },
    #[error("Unknown platform: {name}")]
    UnknownPlatform { name: String },
}

/// Result alias for `ConfigError`.
pub type Result<T, E = ConfigError> = ::core::result::Result<T, E>;
