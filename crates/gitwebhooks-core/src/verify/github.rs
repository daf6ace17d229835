use gitwebhooks_config::PlatformConfig;
use gitwebhooks_crypto::{HmacAlgorithm, Signature};

use super::VerificationOutcome;
use crate::{
    constants::{
        GITHUB_SIGNATURE_256_HEADER, GITHUB_SIGNATURE_HEADER, SHA1_SIGNATURE_PREFIX,
        SHA256_SIGNATURE_PREFIX,
    },
    VerificationFailure, WebhookHeaders,
};

/// Signature header, digest prefix and digest, by preference.
const SIGNATURE_SCHEMES: [(&str, &str, HmacAlgorithm); 2] = [
    (
        GITHUB_SIGNATURE_256_HEADER,
        SHA256_SIGNATURE_PREFIX,
        HmacAlgorithm::Sha256,
    ),
    (
        GITHUB_SIGNATURE_HEADER,
        SHA1_SIGNATURE_PREFIX,
        HmacAlgorithm::Sha1,
    ),
];

/// GitHub signs the raw body with HMAC, hex-encoded behind a digest prefix.
pub(super) fn verify(
    body: &[u8],
    headers: &WebhookHeaders,
    config: &PlatformConfig,
) -> VerificationOutcome {
    if config.secret.is_empty() {
        return Err(VerificationFailure::SecretNotConfigured);
    }

    let (signature, prefix, algorithm) = SIGNATURE_SCHEMES
        .into_iter()
        .find_map(|(header, prefix, algorithm)| {
            headers.get(header).map(|value| (value, prefix, algorithm))
        })
        .ok_or(VerificationFailure::MissingSignature)?;

    let digest = signature
        .strip_prefix(prefix)
        .ok_or(VerificationFailure::InvalidSignatureFormat)?;

    let valid = Signature(digest)
        .is_valid_hex(algorithm, body, &config.secret)
        .map_err(|_| VerificationFailure::InvalidSignatureFormat)?;

    if valid {
        Ok(())
    } else {
        Err(VerificationFailure::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BODY: &[u8] = br#"{"repository":{"full_name":"acme/site"}}"#;
    const SECRET: &str = "s3cret";

    fn sha256_header(body: &[u8], secret: &str) -> WebhookHeaders {
        let digest = Signature::compute_hex(HmacAlgorithm::Sha256, body, secret).unwrap();
        [(GITHUB_SIGNATURE_256_HEADER, format!("sha256={digest}"))]
            .into_iter()
            .collect()
    }

    fn config() -> PlatformConfig {
        PlatformConfig::new().with_secret(SECRET)
    }

    #[test]
    fn valid_sha256_signature() {
        assert_eq!(verify(BODY, &sha256_header(BODY, SECRET), &config()), Ok(()));
    }

    #[test]
    fn known_signature_vector() {
        let headers: WebhookHeaders = [(
            "x-hub-signature-256",
            "sha256=a2b41e3bb9a09babb36b42e145eacc38916d078ba378d60db679f6ac79cd1408",
        )]
        .into_iter()
        .collect();
        let config = PlatformConfig::new().with_secret("iAmAsEcReTkEy");

        assert_eq!(verify(br#"{"secret": "hello"}"#, &headers, &config), Ok(()));
    }

    #[test]
    fn altered_body() {
        let headers = sha256_header(BODY, SECRET);
        let mut body = BODY.to_vec();
        body[3] ^= 0x01;

        assert_eq!(
            verify(&body, &headers, &config()),
            Err(VerificationFailure::InvalidSignature)
        );
    }

    #[test]
    fn wrong_secret() {
        assert_eq!(
            verify(BODY, &sha256_header(BODY, "other"), &config()),
            Err(VerificationFailure::InvalidSignature)
        );
    }

    #[test]
    fn sha1_fallback() {
        let digest = Signature::compute_hex(HmacAlgorithm::Sha1, BODY, SECRET).unwrap();
        let headers: WebhookHeaders = [(GITHUB_SIGNATURE_HEADER, format!("sha1={digest}"))]
            .into_iter()
            .collect();

        assert_eq!(verify(BODY, &headers, &config()), Ok(()));
    }

    #[test]
    fn sha256_header_takes_precedence() {
        let digest = Signature::compute_hex(HmacAlgorithm::Sha256, BODY, SECRET).unwrap();
        let headers: WebhookHeaders = [
            (GITHUB_SIGNATURE_256_HEADER, format!("sha256={digest}")),
            (GITHUB_SIGNATURE_HEADER, "sha1=0000".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(verify(BODY, &headers, &config()), Ok(()));
    }

    #[test]
    fn missing_signature() {
        assert_eq!(
            verify(BODY, &WebhookHeaders::new(), &config()),
            Err(VerificationFailure::MissingSignature)
        );
    }

    #[test]
    fn malformed_signatures() {
        for value in ["a2b41e3b", "sha1=a2b41e3b", "sha256=not-hex"] {
            let headers: WebhookHeaders = [(GITHUB_SIGNATURE_256_HEADER, value)]
                .into_iter()
                .collect();

            assert_eq!(
                verify(BODY, &headers, &config()),
                Err(VerificationFailure::InvalidSignatureFormat),
                "{value} should be malformed"
            );
        }
    }

    #[test]
    fn secret_checked_before_header() {
        let config = PlatformConfig::new().with_secret("");

        assert_eq!(
            verify(BODY, &WebhookHeaders::new(), &config),
            Err(VerificationFailure::SecretNotConfigured)
        );
    }
}
