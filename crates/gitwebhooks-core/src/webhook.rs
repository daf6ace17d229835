use std::collections::HashMap;

use crate::constants::{CONTENT_TYPE_FORM_URLENCODED, CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON};

/// Case-insensitive header map.
///
/// When a header is repeated, the first value is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookHeaders(HashMap<String, String>);

impl WebhookHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }
}

impl<K, V> FromIterator<(K, V)> for WebhookHeaders
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value);
        }
        headers
    }
}

/// Raw webhook request, as handed over by the transport.
#[derive(Debug, Clone, Default)]
pub struct IncomingWebhook {
    /// Raw body bytes.
    pub body: Vec<u8>,
    /// Request headers.
    pub headers: WebhookHeaders,
    /// Declared content type.
    pub content_type: String,
}

impl IncomingWebhook {
    pub fn new(body: impl Into<Vec<u8>>, headers: WebhookHeaders) -> Self {
        let content_type = headers.get(CONTENT_TYPE_HEADER).unwrap_or_default().to_string();

        Self {
            body: body.into(),
            headers,
            content_type,
        }
    }

    /// JSON request with the given body.
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self::new(body, WebhookHeaders::new()).with_content_type(CONTENT_TYPE_JSON)
    }

    /// Form-encoded request with the given body.
    pub fn form(body: impl Into<Vec<u8>>) -> Self {
        Self::new(body, WebhookHeaders::new()).with_content_type(CONTENT_TYPE_FORM_URLENCODED)
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}
