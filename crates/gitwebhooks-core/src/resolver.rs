//! Repository name extraction.

use gitwebhooks_config::{ConfigSnapshot, Platform};
use serde_json::Value;

use crate::ParsedPayload;

const GITHUB_REPOSITORY_PATH: &[&str] = &["repository", "full_name"];
const GITEE_REPOSITORY_PATH: &[&str] = &["repository", "full_name"];
const GITLAB_REPOSITORY_PATH: &[&str] = &["project", "path_with_namespace"];

/// Walk nested objects and return the string at the end of the path.
fn lookup<'a, I>(value: &'a Value, path: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    path.into_iter()
        .try_fold(value, |current, segment| current.as_object()?.get(segment))?
        .as_str()
}

/// Extract the repository name a payload refers to.
///
/// Returns `None` when the path is missing, crosses a non-object,
/// or ends on a non-string value.
pub fn extract_repository(
    payload: &ParsedPayload,
    platform: Platform,
    snapshot: &ConfigSnapshot,
) -> Option<String> {
    let value = payload.as_value();

    let name = match platform {
        Platform::GitHub => lookup(value, GITHUB_REPOSITORY_PATH.iter().copied()),
        Platform::Gitee => lookup(value, GITEE_REPOSITORY_PATH.iter().copied()),
        Platform::GitLab => lookup(value, GITLAB_REPOSITORY_PATH.iter().copied()),
        Platform::Custom => {
            let path = snapshot.custom.identifier_path.as_str();
            if path.is_empty() {
                return None;
            }
            lookup(value, path.split('.'))
        }
    };

    name.map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use gitwebhooks_config::CustomPlatformConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> ParsedPayload {
        ParsedPayload(value)
    }

    fn custom(path: &str) -> ConfigSnapshot {
        ConfigSnapshot::default()
            .with_custom(CustomPlatformConfig::default().with_identifier_path(path))
    }

    #[test]
    fn github_and_gitee() {
        let payload = payload(json!({"repository": {"full_name": "acme/site"}}));
        let snapshot = ConfigSnapshot::default();

        assert_eq!(
            extract_repository(&payload, Platform::GitHub, &snapshot),
            Some("acme/site".into())
        );
        assert_eq!(
            extract_repository(&payload, Platform::Gitee, &snapshot),
            Some("acme/site".into())
        );
        assert_eq!(extract_repository(&payload, Platform::GitLab, &snapshot), None);
    }

    #[test]
    fn gitlab() {
        let payload = payload(json!({"project": {"path_with_namespace": "group/app"}}));

        assert_eq!(
            extract_repository(&payload, Platform::GitLab, &ConfigSnapshot::default()),
            Some("group/app".into())
        );
    }

    #[test]
    fn custom_path() {
        let payload = payload(json!({"project": {"sub": {"id": "svc"}}}));

        assert_eq!(
            extract_repository(&payload, Platform::Custom, &custom("project.sub.id")),
            Some("svc".into())
        );
        assert_eq!(
            extract_repository(&payload, Platform::Custom, &custom("project.sub")),
            None
        );
        assert_eq!(
            extract_repository(&payload, Platform::Custom, &custom("project.missing.id")),
            None
        );
    }

    #[test]
    fn custom_empty_path() {
        let payload = payload(json!({"": "root"}));

        assert_eq!(extract_repository(&payload, Platform::Custom, &custom("")), None);
    }

    #[test]
    fn non_string_leaf_or_non_object_step() {
        let snapshot = ConfigSnapshot::default();

        for value in [
            json!({"repository": {"full_name": 42}}),
            json!({"repository": ["acme/site"]}),
            json!({"repository": "acme/site"}),
            json!(["repository"]),
            json!(null),
        ] {
            assert_eq!(
                extract_repository(&payload(value), Platform::GitHub, &snapshot),
                None
            );
        }
    }

    #[test]
    fn repeated_extraction_is_stable() {
        let payload = payload(json!({"repository": {"full_name": "acme/site"}}));
        let snapshot = ConfigSnapshot::default();

        let first = extract_repository(&payload, Platform::GitHub, &snapshot);
        let second = extract_repository(&payload, Platform::GitHub, &snapshot);

        assert_eq!(first, second);
    }
}
