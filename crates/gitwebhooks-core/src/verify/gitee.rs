use gitwebhooks_config::PlatformConfig;
use gitwebhooks_crypto::{constant_time_eq, Signature};

use super::VerificationOutcome;
use crate::{
    constants::{GITEE_TIMESTAMP_HEADER, GITEE_TOKEN_HEADER},
    VerificationFailure, WebhookHeaders,
};

/// Gitee either signs `timestamp ++ body` with HMAC-SHA256 (base64), when a
/// timestamp header is present, or sends the password as-is.
pub(super) fn verify(
    body: &[u8],
    headers: &WebhookHeaders,
    config: &PlatformConfig,
) -> VerificationOutcome {
    if config.secret.is_empty() {
        return Err(VerificationFailure::SecretNotConfigured);
    }

    let token = headers
        .get(GITEE_TOKEN_HEADER)
        .ok_or(VerificationFailure::MissingToken)?;

    match headers.get(GITEE_TIMESTAMP_HEADER) {
        Some(timestamp) => verify_signature(body, token, timestamp, &config.secret),
        None if constant_time_eq(token, &config.secret) => Ok(()),
        None => Err(VerificationFailure::InvalidToken),
    }
}

fn verify_signature(
    body: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &str,
) -> VerificationOutcome {
    if timestamp.parse::<u64>().is_err() {
        return Err(VerificationFailure::InvalidTimestamp);
    }

    let valid = Signature(signature)
        .is_valid_base64(&[timestamp.as_bytes(), body], secret)
        .map_err(|_| VerificationFailure::InvalidSignatureFormat)?;

    if valid {
        Ok(())
    } else {
        Err(VerificationFailure::InvalidSignature)
    }
}
