use gitwebhooks_config::CustomPlatformConfig;

use super::{verify_token, VerificationOutcome};
use crate::WebhookHeaders;

/// Custom sources compare the configured token header against the secret.
///
/// An empty token header name disables the check.
pub(super) fn verify(
    _body: &[u8],
    headers: &WebhookHeaders,
    config: &CustomPlatformConfig,
) -> VerificationOutcome {
    if config.header_token.is_empty() {
        return Ok(());
    }

    verify_token(headers, &config.header_token, &config.common.secret)
}
