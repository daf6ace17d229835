//! Webhook constants.

/// GitHub event header.
pub const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";
/// GitHub SHA-256 signature header.
pub const GITHUB_SIGNATURE_256_HEADER: &str = "X-Hub-Signature-256";
/// GitHub legacy SHA-1 signature header.
pub const GITHUB_SIGNATURE_HEADER: &str = "X-Hub-Signature";
/// SHA-256 signature prefix.
pub const SHA256_SIGNATURE_PREFIX: &str = "sha256=";
/// SHA-1 signature prefix.
pub const SHA1_SIGNATURE_PREFIX: &str = "sha1=";

/// Gitee event header.
pub const GITEE_EVENT_HEADER: &str = "X-Gitee-Event";
/// Gitee token (signature or password) header.
pub const GITEE_TOKEN_HEADER: &str = "X-Gitee-Token";
/// Gitee timestamp header.
pub const GITEE_TIMESTAMP_HEADER: &str = "X-Gitee-Timestamp";

/// GitLab event header.
pub const GITLAB_EVENT_HEADER: &str = "X-Gitlab-Event";
/// GitLab token header.
pub const GITLAB_TOKEN_HEADER: &str = "X-Gitlab-Token";

/// Content type header.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// JSON media type.
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Form media type.
pub const CONTENT_TYPE_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
/// Form field holding the JSON payload.
pub const FORM_PAYLOAD_FIELD: &str = "payload";
