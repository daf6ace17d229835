//! Provider identification.

use gitwebhooks_config::{ConfigSnapshot, Platform};

use crate::{
    constants::{GITEE_EVENT_HEADER, GITHUB_EVENT_HEADER, GITLAB_EVENT_HEADER},
    WebhookHeaders,
};

/// Platform a request claims to come from, with its event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    pub platform: Platform,
    pub event: Option<String>,
}

/// Header carrying the event name for a platform, if any.
pub fn event_header(platform: Platform, snapshot: &ConfigSnapshot) -> Option<&str> {
    match platform {
        Platform::GitHub => Some(GITHUB_EVENT_HEADER),
        Platform::Gitee => Some(GITEE_EVENT_HEADER),
        Platform::GitLab => Some(GITLAB_EVENT_HEADER),
        Platform::Custom => {
            let header = snapshot.custom.header_event.as_str();
            (!header.is_empty()).then_some(header)
        }
    }
}

fn claims(platform: Platform, headers: &WebhookHeaders, snapshot: &ConfigSnapshot) -> bool {
    match platform {
        Platform::GitHub => headers.contains(GITHUB_EVENT_HEADER),
        Platform::Gitee => headers.contains(GITEE_EVENT_HEADER),
        Platform::GitLab => headers.contains(GITLAB_EVENT_HEADER),
        Platform::Custom => {
            let custom = &snapshot.custom;
            // A non-empty value starting with the configured value matches.
            !custom.header_name.is_empty()
                && headers.get(&custom.header_name).is_some_and(|value| {
                    !value.is_empty() && value.starts_with(custom.header_value.as_str())
                })
        }
    }
}

/// Decide which platform sent a request.
///
/// Platforms are tried in [`Platform::ALL`] order; the first match wins.
pub fn identify(headers: &WebhookHeaders, snapshot: &ConfigSnapshot) -> Option<Identification> {
    let platform = Platform::ALL
        .into_iter()
        .find(|platform| claims(*platform, headers, snapshot))?;

    let event = event_header(platform, snapshot)
        .and_then(|header| headers.get(header))
        .map(ToOwned::to_owned);

    Some(Identification { platform, event })
}

#[cfg(test)]
mod tests {
    use gitwebhooks_config::CustomPlatformConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> WebhookHeaders {
        pairs.iter().copied().collect()
    }

    fn custom_snapshot() -> ConfigSnapshot {
        ConfigSnapshot::default().with_custom(
            CustomPlatformConfig::default()
                .with_identification("X-Deploy-Source", "ci")
                .with_event_header("X-Deploy-Event"),
        )
    }

    #[test]
    fn github() {
        assert_eq!(
            identify(&headers(&[("x-github-event", "push")]), &ConfigSnapshot::default()),
            Some(Identification {
                platform: Platform::GitHub,
                event: Some("push".into())
            })
        );
    }

    #[test]
    fn gitee_and_gitlab() {
        let snapshot = ConfigSnapshot::default();

        assert_eq!(
            identify(&headers(&[("X-Gitee-Event", "Push Hook")]), &snapshot).map(|i| i.platform),
            Some(Platform::Gitee)
        );
        assert_eq!(
            identify(&headers(&[("X-Gitlab-Event", "Push Hook")]), &snapshot).map(|i| i.platform),
            Some(Platform::GitLab)
        );
    }

    #[test]
    fn first_match_wins() {
        let identification = identify(
            &headers(&[
                ("X-Gitlab-Event", "Push Hook"),
                ("X-Gitee-Event", "Push Hook"),
                ("X-GitHub-Event", "push"),
                ("X-Deploy-Source", "ci"),
            ]),
            &custom_snapshot(),
        )
        .unwrap();

        assert_eq!(identification.platform, Platform::GitHub);
    }

    #[test]
    fn custom_value_matches_prefix() {
        let snapshot = custom_snapshot();

        assert_eq!(
            identify(
                &headers(&[("X-Deploy-Source", "ci"), ("X-Deploy-Event", "deploy")]),
                &snapshot
            ),
            Some(Identification {
                platform: Platform::Custom,
                event: Some("deploy".into())
            })
        );
        for value in ["cicd", "ci/1.2"] {
            assert_eq!(
                identify(&headers(&[("X-Deploy-Source", value)]), &snapshot).map(|i| i.platform),
                Some(Platform::Custom)
            );
        }
        for value in ["CI", "xci", "c", ""] {
            assert_eq!(identify(&headers(&[("X-Deploy-Source", value)]), &snapshot), None);
        }
    }

    #[test]
    fn custom_without_event_header() {
        let snapshot = ConfigSnapshot::default().with_custom(
            CustomPlatformConfig::default().with_identification("X-Deploy-Source", "ci"),
        );

        assert_eq!(
            identify(&headers(&[("X-Deploy-Source", "ci")]), &snapshot),
            Some(Identification {
                platform: Platform::Custom,
                event: None
            })
        );
    }

    #[test]
    fn custom_disabled_when_header_name_empty() {
        let snapshot = ConfigSnapshot::default()
            .with_custom(CustomPlatformConfig::default().with_identification("", ""));

        assert_eq!(identify(&headers(&[("", "")]), &snapshot), None);
        assert_eq!(identify(&headers(&[]), &snapshot), None);
    }

    #[test]
    fn unknown() {
        assert_eq!(
            identify(
                &headers(&[("X-Event-Key", "repo:push")]),
                &ConfigSnapshot::default()
            ),
            None
        );
    }
}
