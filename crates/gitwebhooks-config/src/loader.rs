//! INI configuration loading.

use std::path::Path;

use ini::{Ini, ParseOption, Properties};
use tracing::warn;

use crate::{
    ConfigError, ConfigSnapshot, CustomPlatformConfig, Platform, PlatformConfig,
    RepositoryConfig, Result,
};

/// Sections that never describe a repository.
pub const RESERVED_SECTIONS: [&str; 6] = ["server", "ssl", "github", "gitee", "gitlab", "custom"];

const DEFAULT_CUSTOM_HEADER_NAME: &str = "X-Custom-Webhook";
const DEFAULT_CUSTOM_HEADER_VALUE: &str = "custom";
const DEFAULT_CUSTOM_HEADER_EVENT: &str = "X-Custom-Event";
const DEFAULT_CUSTOM_HEADER_TOKEN: &str = "X-Custom-Token";

fn parse_options() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// Read an INI file.
pub fn load_file(path: &Path) -> Result<Ini> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    Ini::load_from_file_opt(path, parse_options()).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse INI contents.
pub fn load_str(contents: &str) -> Result<Ini> {
    Ini::load_from_str_opt(contents, parse_options())
        .map_err(|e| ConfigError::ParseError { source: e })
}

pub(crate) fn section<'a>(ini: &'a Ini, name: &str) -> Option<&'a Properties> {
    ini.section(Some(name))
}

pub(crate) fn get_str(ini: &Ini, section_name: &str, key: &str, default: &str) -> String {
    section(ini, section_name)
        .and_then(|s| s.get(key))
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn get_bool(ini: &Ini, section_name: &str, key: &str, default: bool) -> Result<bool> {
    match section(ini, section_name).and_then(|s| s.get(key)) {
        None => Ok(default),
        Some(value) => parse_bool(value).ok_or_else(|| ConfigError::InvalidBoolean {
            section: section_name.into(),
            key: key.into(),
            value: value.into(),
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match &value.trim().to_lowercase()[..] {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn parse_events(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn load_platform(ini: &Ini, platform: Platform) -> Result<PlatformConfig> {
    let name = platform.section_name();

    Ok(PlatformConfig {
        verify: get_bool(ini, name, "verify", false)?,
        secret: get_str(ini, name, "secret", ""),
        handle_events: parse_events(&get_str(ini, name, "handle_events", "")),
    })
}

fn load_custom(ini: &Ini) -> Result<CustomPlatformConfig> {
    let common = load_platform(ini, Platform::Custom)?;
    let name = Platform::Custom.section_name();

    // Without a [custom] section, custom identification stays disabled.
    if section(ini, name).is_none() {
        return Ok(CustomPlatformConfig {
            common,
            ..Default::default()
        });
    }

    Ok(CustomPlatformConfig {
        common,
        header_name: get_str(ini, name, "header_name", DEFAULT_CUSTOM_HEADER_NAME),
        header_value: get_str(ini, name, "header_value", DEFAULT_CUSTOM_HEADER_VALUE),
        header_event: get_str(ini, name, "header_event", DEFAULT_CUSTOM_HEADER_EVENT),
        header_token: get_str(ini, name, "header_token", DEFAULT_CUSTOM_HEADER_TOKEN),
        identifier_path: get_str(ini, name, "identifier_path", ""),
    })
}

fn load_repository(name: &str, properties: &Properties) -> Option<RepositoryConfig> {
    match (properties.get("cwd"), properties.get("cmd")) {
        (Some(cwd), Some(cmd)) => Some(RepositoryConfig::new(cwd.trim(), cmd.trim())),
        (cwd, _) => {
            let missing = if cwd.is_none() { "cwd" } else { "cmd" };
            warn!(
                repository = name,
                missing = missing,
                message = "Skipping incomplete repository configuration"
            );
            None
        }
    }
}

/// Build a snapshot from a parsed INI file.
pub fn load_snapshot(ini: &Ini) -> Result<ConfigSnapshot> {
    let mut snapshot = ConfigSnapshot {
        github: load_platform(ini, Platform::GitHub)?,
        gitee: load_platform(ini, Platform::Gitee)?,
        gitlab: load_platform(ini, Platform::GitLab)?,
        custom: load_custom(ini)?,
        ..Default::default()
    };

    for (name, properties) in ini.iter() {
        let Some(name) = name else {
            continue;
        };

        if RESERVED_SECTIONS.contains(&name) {
            continue;
        }

        if let Some(repository) = load_repository(name, properties) {
            snapshot.repositories.insert(name.to_string(), repository);
        }
    }

    Ok(snapshot)
}

/// Read a snapshot from a file.
pub fn load_snapshot_from_file(path: &Path) -> Result<ConfigSnapshot> {
    load_snapshot(&load_file(path)?)
}
