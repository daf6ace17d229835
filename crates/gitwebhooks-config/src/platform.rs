use std::{fmt, str::FromStr};

use crate::ConfigError;

/// Git hosting platform a webhook claims to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    GitHub,
    Gitee,
    GitLab,
    Custom,
}

impl Platform {
    /// Every platform, in identification order.
    pub const ALL: [Platform; 4] = [
        Platform::GitHub,
        Platform::Gitee,
        Platform::GitLab,
        Platform::Custom,
    ];

    /// Configuration section name for this platform.
    pub fn section_name(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::Gitee => "gitee",
            Self::GitLab => "gitlab",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "github" => Ok(Self::GitHub),
            "gitee" => Ok(Self::Gitee),
            "gitlab" => Ok(Self::GitLab),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::UnknownPlatform { name: s.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_names_round_trip() {
        for platform in Platform::ALL {
            assert_eq!(
                Platform::from_str(platform.section_name()).unwrap(),
                platform
            );
        }
    }

    #[test]
    fn unknown_platform() {
        assert!(matches!(
            Platform::from_str("bitbucket"),
            Err(ConfigError::UnknownPlatform { name }) if name == "bitbucket"
        ));
    }
}
