//! Decoded response bodies

use serde_json::Value;

/// Body returned by an API call
///
/// JSONLines output is not a single JSON document, so it comes back as
/// [`ApiResponse::Text`] with the original text untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Body parsed as a single JSON document
    Json(Value),
    /// Body that is not valid JSON, kept as received
    Text(String),
}

impl ApiResponse {
    /// Decode a body as JSON, falling back to the raw text
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    /// Parsed body, unless it came back as text
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Look up a top-level field of a JSON object body
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(name))
    }
}
