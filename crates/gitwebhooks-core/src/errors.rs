//! Core errors.

use thiserror::Error;

/// Request body could not be turned into a payload.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported content type '{content_type}'")]
    UnsupportedContentType { content_type: String },
    #[error("Empty request body")]
    EmptyBody,
    #[error("Invalid JSON: {source}")]
    InvalidJson { source: serde_json::Error },
    #[error("Invalid form data: {source}")]
    InvalidForm {
        source: serde_urlencoded::de::Error,
    },
    #[error("Form data has no 'payload' field")]
    MissingFormPayload,
}

/// Reason a webhook failed authentication.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("Verification enabled but no secret configured")]
    SecretNotConfigured,
    #[error("Missing signature")]
    MissingSignature,
    #[error("Invalid signature format")]
    InvalidSignatureFormat,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid timestamp format")]
    InvalidTimestamp,
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
}

impl VerificationFailure {
    /// The failure comes from the configuration, not from the request.
    pub fn is_configuration_fault(&self) -> bool {
        matches!(self, Self::SecretNotConfigured)
    }
}
