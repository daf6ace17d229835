//! Validation utilities.

use std::fmt::Write;

use gitwebhooks_config::{Config, CustomPlatformConfig, Platform};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors in configuration file {}:\n{}", path, errors)]
    ConfigFileError { path: String, errors: String },
}

#[inline]
fn _push(target: &mut String, message: &str) {
    target.push('\n');
    // Writing into a String cannot fail.
    let _ = write!(target, "  - {}", message);
}

fn validate_server(config: &Config, error: &mut String) {
    if config.server.bind_ip.is_empty() {
        _push(error, "Empty bind address: [server] address");
    }
    if config.server.bind_port == 0 {
        _push(error, "Invalid bind port: [server] port");
    }
    if config.ssl.enabled {
        _push(
            error,
            "TLS is not supported: disable [ssl] enable and terminate TLS in a reverse proxy",
        );
    }
}

fn validate_repositories(config: &Config, error: &mut String) {
    for fault in config.snapshot.repository_faults() {
        _push(error, &fault.to_string());
    }
}

fn is_custom_configured(custom: &CustomPlatformConfig) -> bool {
    custom != &CustomPlatformConfig::default()
}

fn collect_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    for platform in Platform::ALL {
        if config.snapshot.platform(platform).has_missing_secret() {
            warnings.push(format!(
                "Verification enabled without secret for [{}]: every request will be rejected",
                platform.section_name()
            ));
        }
    }

    let custom = &config.snapshot.custom;
    if custom.header_name.is_empty() && is_custom_configured(custom) {
        warnings.push(
            "Custom identification disabled: [custom] header_name is empty".to_string(),
        );
    }

    warnings
}

/// Validate configuration.
///
/// Returns the warnings on success.
pub fn validate_configuration(config: &Config) -> Result<Vec<String>, ValidationError> {
    let mut error = String::new();

    validate_server(config, &mut error);
    validate_repositories(config, &mut error);

    if error.is_empty() {
        Ok(collect_warnings(config))
    } else {
        Err(ValidationError::ConfigFileError {
            path: config.path.display().to_string(),
            errors: error,
        })
    }
}
