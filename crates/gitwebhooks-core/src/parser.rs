//! Request body parsing.

use serde_json::Value;

use crate::{
    constants::{CONTENT_TYPE_FORM_URLENCODED, CONTENT_TYPE_JSON, FORM_PAYLOAD_FIELD},
    ParseError,
};

/// Structured webhook body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPayload(pub Value);

impl ParsedPayload {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Media type without parameters, lowercased.
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Decode a webhook body.
///
/// Accepts JSON bodies and form bodies whose `payload` field holds JSON.
pub fn parse(body: &[u8], content_type: &str) -> Result<ParsedPayload, ParseError> {
    let media_type = media_type(content_type);
    let is_json = media_type == CONTENT_TYPE_JSON;

    if !is_json && media_type != CONTENT_TYPE_FORM_URLENCODED {
        return Err(ParseError::UnsupportedContentType {
            content_type: content_type.into(),
        });
    }

    if body.is_empty() {
        return Err(ParseError::EmptyBody);
    }

    if is_json {
        parse_json(body)
    } else {
        parse_form(body)
    }
}

fn parse_json(body: &[u8]) -> Result<ParsedPayload, ParseError> {
    serde_json::from_slice(body)
        .map(ParsedPayload)
        .map_err(|e| ParseError::InvalidJson { source: e })
}

fn parse_form(body: &[u8]) -> Result<ParsedPayload, ParseError> {
    let fields: Vec<(String, String)> =
        serde_urlencoded::from_bytes(body).map_err(|e| ParseError::InvalidForm { source: e })?;

    let (_, payload) = fields
        .into_iter()
        .find(|(name, _)| name == FORM_PAYLOAD_FIELD)
        .ok_or(ParseError::MissingFormPayload)?;

    parse_json(payload.as_bytes())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn json_body() {
        let payload = parse(
            br#"{"repository":{"full_name":"acme/site"}}"#,
            "application/json",
        )
        .unwrap();

        assert_eq!(payload.0, json!({"repository": {"full_name": "acme/site"}}));
    }

    #[test]
    fn json_with_parameters() {
        assert!(parse(b"{}", "Application/JSON; charset=utf-8").is_ok());
    }

    #[test]
    fn form_body_with_payload_field() {
        let payload = parse(
            b"payload=%7B%22repository%22%3A%7B%22full_name%22%3A%22acme%2Fsite%22%7D%7D&other=1",
            "application/x-www-form-urlencoded",
        )
        .unwrap();

        assert_eq!(payload.0, json!({"repository": {"full_name": "acme/site"}}));
    }

    #[test]
    fn form_body_without_payload_field() {
        assert!(matches!(
            parse(b"other=1", "application/x-www-form-urlencoded"),
            Err(ParseError::MissingFormPayload)
        ));
    }

    #[test]
    fn form_payload_must_be_json() {
        assert!(matches!(
            parse(b"payload=not-json", "application/x-www-form-urlencoded"),
            Err(ParseError::InvalidJson { .. })
        ));
    }

    #[test]
    fn unsupported_content_types() {
        for content_type in ["text/plain", "", "application/xml", "multipart/form-data"] {
            assert!(
                matches!(
                    parse(br#"{"a":1}"#, content_type),
                    Err(ParseError::UnsupportedContentType { .. })
                ),
                "{content_type} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            parse(b"{\"repository\":", "application/json"),
            Err(ParseError::InvalidJson { .. })
        ));
    }

    #[test]
    fn empty_body() {
        assert!(matches!(
            parse(b"", "application/json"),
            Err(ParseError::EmptyBody)
        ));
    }
}
