//! Signature and token verification.
//!
//! Each platform module exposes a pure `verify` function over the raw body,
//! the request headers and the platform configuration. The caller decides
//! whether verification is enabled.

mod custom;
mod gitee;
mod github;
mod gitlab;

use gitwebhooks_config::{ConfigSnapshot, Platform};

use crate::{IncomingWebhook, VerificationFailure};

/// Verification result.
pub type VerificationOutcome = Result<(), VerificationFailure>;

/// Verify a webhook against its platform configuration.
pub fn verify(
    platform: Platform,
    webhook: &IncomingWebhook,
    snapshot: &ConfigSnapshot,
) -> VerificationOutcome {
    match platform {
        Platform::GitHub => github::verify(&webhook.body, &webhook.headers, &snapshot.github),
        Platform::Gitee => gitee::verify(&webhook.body, &webhook.headers, &snapshot.gitee),
        Platform::GitLab => gitlab::verify(&webhook.body, &webhook.headers, &snapshot.gitlab),
        Platform::Custom => custom::verify(&webhook.body, &webhook.headers, &snapshot.custom),
    }
}

/// Constant-time comparison of a token header against a secret.
fn verify_token(
    headers: &crate::WebhookHeaders,
    header: &str,
    secret: &str,
) -> VerificationOutcome {
    if secret.is_empty() {
        return Err(VerificationFailure::SecretNotConfigured);
    }

    let token = headers
        .get(header)
        .ok_or(VerificationFailure::MissingToken)?;

    if gitwebhooks_crypto::constant_time_eq(token, secret) {
        Ok(())
    } else {
        Err(VerificationFailure::InvalidToken)
    }
}
