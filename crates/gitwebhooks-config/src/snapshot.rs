//! Per-request configuration snapshot.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{ConfigError, Platform, Result};

/// Options shared by every platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Verify signature or token.
    pub verify: bool,
    /// Shared secret.
    pub secret: String,
    /// Handled events (empty = all events).
    pub handle_events: Vec<String>,
}

impl PlatformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable verification with a secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.verify = true;
        self.secret = secret.into();
        self
    }

    /// Restrict handled events.
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handle_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Verification is enabled but nothing can be verified against.
    pub fn has_missing_secret(&self) -> bool {
        self.verify && self.secret.is_empty()
    }
}

/// Custom platform options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomPlatformConfig {
    /// Common platform options.
    pub common: PlatformConfig,
    /// Identification header name (empty = custom identification disabled).
    pub header_name: String,
    /// Identification header value.
    pub header_value: String,
    /// Event header name.
    pub header_event: String,
    /// Token header name (empty = no token verification).
    pub header_token: String,
    /// Dot-separated path to the repository identifier.
    pub identifier_path: String,
}

impl CustomPlatformConfig {
    /// Identify requests carrying `name: value`.
    pub fn with_identification(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_name = name.into();
        self.header_value = value.into();
        self
    }

    /// Read the event name from `name`.
    pub fn with_event_header(mut self, name: impl Into<String>) -> Self {
        self.header_event = name.into();
        self
    }

    /// Compare the `name` header against the secret.
    pub fn with_token_header(mut self, name: impl Into<String>) -> Self {
        self.header_token = name.into();
        self
    }

    /// Resolve the repository from `path`.
    pub fn with_identifier_path(mut self, path: impl Into<String>) -> Self {
        self.identifier_path = path.into();
        self
    }

    /// Use common options.
    pub fn with_common(mut self, common: PlatformConfig) -> Self {
        self.common = common;
        self
    }
}

/// Deployment target for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Working directory.
    pub cwd: PathBuf,
    /// Deployment command (shell string).
    pub cmd: String,
}

impl RepositoryConfig {
    pub fn new(cwd: impl Into<PathBuf>, cmd: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            cmd: cmd.into(),
        }
    }
}

/// Immutable view of platform and repository configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub github: PlatformConfig,
    pub gitee: PlatformConfig,
    pub gitlab: PlatformConfig,
    pub custom: CustomPlatformConfig,
    /// Repositories, keyed by exact identifier.
    pub repositories: HashMap<String, RepositoryConfig>,
}

impl ConfigSnapshot {
    /// Common options for a platform.
    pub fn platform(&self, platform: Platform) -> &PlatformConfig {
        match platform {
            Platform::GitHub => &self.github,
            Platform::Gitee => &self.gitee,
            Platform::GitLab => &self.gitlab,
            Platform::Custom => &self.custom.common,
        }
    }

    /// Repositories with an empty `cwd` or `cmd`, sorted by name.
    pub fn repository_faults(&self) -> Vec<ConfigError> {
        let mut names: Vec<_> = self.repositories.keys().collect();
        names.sort();

        let mut faults = Vec::new();
        for name in names {
            let repository = &self.repositories[name];
            if repository.cwd.as_os_str().is_empty() {
                faults.push(ConfigError::EmptyRepositoryOption {
                    name: name.clone(),
                    key: "cwd".into(),
                });
            }
            if repository.cmd.is_empty() {
                faults.push(ConfigError::EmptyRepositoryOption {
                    name: name.clone(),
                    key: "cmd".into(),
                });
            }
        }
        faults
    }

    /// Fail on the first unusable repository.
    pub fn validate(&self) -> Result<()> {
        match self.repository_faults().into_iter().next() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    /// Exact-match repository lookup.
    pub fn repository(&self, name: &str) -> Option<&RepositoryConfig> {
        self.repositories.get(name)
    }

    pub fn with_platform(mut self, platform: Platform, config: PlatformConfig) -> Self {
        match platform {
            Platform::GitHub => self.github = config,
            Platform::Gitee => self.gitee = config,
            Platform::GitLab => self.gitlab = config,
            Platform::Custom => self.custom.common = config,
        }
        self
    }

    pub fn with_custom(mut self, custom: CustomPlatformConfig) -> Self {
        self.custom = custom;
        self
    }

    pub fn with_repository(mut self, name: impl Into<String>, config: RepositoryConfig) -> Self {
        self.repositories.insert(name.into(), config);
        self
    }
}

/// Holder for the current snapshot.
///
/// Readers clone the inner `Arc`; reloads swap it wholesale.
#[derive(Debug, Default)]
pub struct SharedSnapshot {
    inner: RwLock<Arc<ConfigSnapshot>>,
}

impl SharedSnapshot {
    pub fn new(snapshot: ConfigSnapshot) -> Self {
        Self {
            inner: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Snapshot at the time of the call.
    pub fn current(&self) -> Arc<ConfigSnapshot> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new snapshot, returning the previous one.
    pub fn replace(&self, snapshot: ConfigSnapshot) -> Arc<ConfigSnapshot> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn platform_accessor_is_exhaustive() {
        let snapshot = ConfigSnapshot::default()
            .with_platform(Platform::GitLab, PlatformConfig::new().with_secret("token"))
            .with_platform(Platform::Custom, PlatformConfig::new().with_events(["deploy"]));

        assert_eq!(snapshot.platform(Platform::GitLab).secret, "token");
        assert_eq!(snapshot.platform(Platform::Custom).handle_events, vec!["deploy"]);
        assert_eq!(snapshot.platform(Platform::GitHub), &PlatformConfig::default());
    }

    #[test]
    fn missing_secret() {
        assert!(!PlatformConfig::new().has_missing_secret());
        assert!(PlatformConfig::new().with_secret("").has_missing_secret());
        assert!(!PlatformConfig::new().with_secret("s").has_missing_secret());
    }

    #[test]
    fn repository_lookup_is_exact() {
        let snapshot = ConfigSnapshot::default()
            .with_repository("acme/site", RepositoryConfig::new("/srv/site", "make deploy"));

        assert!(snapshot.repository("acme/site").is_some());
        assert!(snapshot.repository("Acme/site").is_none());
        assert!(snapshot.repository("acme/site/").is_none());
    }

    #[test]
    fn empty_repository_options_are_faults() {
        let snapshot = ConfigSnapshot::default()
            .with_repository("acme/site", RepositoryConfig::new("/srv/site", "make"))
            .with_repository("acme/docs", RepositoryConfig::new("", ""))
            .with_repository("acme/blog", RepositoryConfig::new("/srv/blog", ""));

        let faults: Vec<_> = snapshot
            .repository_faults()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            faults,
            vec![
                "Empty option 'cmd' in repository [acme/blog]",
                "Empty option 'cwd' in repository [acme/docs]",
                "Empty option 'cmd' in repository [acme/docs]",
            ]
        );
        assert!(matches!(
            snapshot.validate(),
            Err(ConfigError::EmptyRepositoryOption { name, key }) if name == "acme/blog" && key == "cmd"
        ));
    }

    #[test]
    fn complete_repositories_validate() {
        let snapshot = ConfigSnapshot::default()
            .with_repository("acme/site", RepositoryConfig::new("/srv/site", "make"));

        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn replace_keeps_readers_on_old_snapshot() {
        let shared = SharedSnapshot::new(ConfigSnapshot::default());
        let before = shared.current();

        shared.replace(
            ConfigSnapshot::default()
                .with_repository("acme/site", RepositoryConfig::new("/srv", "true")),
        );

        assert!(before.repositories.is_empty());
        assert_eq!(shared.current().repositories.len(), 1);
    }
}
