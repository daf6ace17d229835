use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Mac, SimpleHmac};
use sha1::Sha1;
use sha2::Sha256;

use super::errors::CryptoError;

/// HMAC digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacAlgorithm {
    Sha1,
    Sha256,
}

macro_rules! with_mac {
    ($algorithm:expr, $secret:expr, $parts:expr, |$mac:ident| $body:expr) => {{
        match $algorithm {
            HmacAlgorithm::Sha1 => {
                let mut $mac = SimpleHmac::<Sha1>::new_from_slice($secret.as_bytes())
                    .map_err(|_| CryptoError::InvalidSecretKeyLength)?;
                for part in $parts {
                    $mac.update(part);
                }
                $body
            }
            HmacAlgorithm::Sha256 => {
                let mut $mac = SimpleHmac::<Sha256>::new_from_slice($secret.as_bytes())
                    .map_err(|_| CryptoError::InvalidSecretKeyLength)?;
                for part in $parts {
                    $mac.update(part);
                }
                $body
            }
        }
    }};
}

/// Signature.
pub struct Signature<'a>(pub &'a str);

impl<'a> Signature<'a> {
    /// Check a hex-encoded HMAC over `body`.
    pub fn is_valid_hex(
        &self,
        algorithm: HmacAlgorithm,
        body: &[u8],
        secret: &str,
    ) -> Result<bool, CryptoError> {
        let decoded = hex::decode(self.0).map_err(|_| CryptoError::InvalidSignatureFormat)?;
        Self::verify(algorithm, secret, &[body], &decoded)
    }

    /// Check a base64-encoded HMAC-SHA256 over the concatenation of `parts`.
    pub fn is_valid_base64(&self, parts: &[&[u8]], secret: &str) -> Result<bool, CryptoError> {
        let decoded = STANDARD
            .decode(self.0)
            .map_err(|_| CryptoError::InvalidSignatureFormat)?;
        Self::verify(HmacAlgorithm::Sha256, secret, parts, &decoded)
    }

    /// Hex-encoded HMAC over `body`.
    pub fn compute_hex(
        algorithm: HmacAlgorithm,
        body: &[u8],
        secret: &str,
    ) -> Result<String, CryptoError> {
        with_mac!(algorithm, secret, [body], |mac| Ok(hex::encode(
            mac.finalize().into_bytes()
        )))
    }

    /// Base64-encoded HMAC-SHA256 over the concatenation of `parts`.
    pub fn compute_base64(parts: &[&[u8]], secret: &str) -> Result<String, CryptoError> {
        with_mac!(HmacAlgorithm::Sha256, secret, parts, |mac| Ok(STANDARD
            .encode(mac.finalize().into_bytes())))
    }

    fn verify(
        algorithm: HmacAlgorithm,
        secret: &str,
        parts: &[&[u8]],
        expected: &[u8],
    ) -> Result<bool, CryptoError> {
        // verify_slice compares in constant time.
        with_mac!(algorithm, secret, parts, |mac| Ok(mac
            .verify_slice(expected)
            .is_ok()))
    }
}
