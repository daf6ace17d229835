use gitwebhooks_config::PlatformConfig;

use super::{verify_token, VerificationOutcome};
use crate::{constants::GITLAB_TOKEN_HEADER, WebhookHeaders};

/// GitLab sends the secret token as-is.
pub(super) fn verify(
    _body: &[u8],
    headers: &WebhookHeaders,
    config: &PlatformConfig,
) -> VerificationOutcome {
    verify_token(headers, GITLAB_TOKEN_HEADER, &config.secret)
}
