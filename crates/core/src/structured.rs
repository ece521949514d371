use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque structured data attached to an error
pub type ErrorData = Map<String, Value>;

/// An HTTP-classified error: status code, safe-to-expose message and data.
///
/// Status code and message are fixed at construction. No validation is
/// performed on the status code; callers are expected to pass a real HTTP
/// status.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredError {
    status_code: u16,
    message: String,
    data: ErrorData,
}

impl StructuredError {
    pub fn new(status_code: u16, message: impl Into<String>, data: Option<ErrorData>) -> Self {
        Self {
            status_code,
            message: message.into(),
            data: data.unwrap_or_default(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &ErrorData {
        &self.data
    }

    /// Canonical reason phrase for the status code, e.g. `"Not Found"`
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown")
    }

    /// The status and JSON body a client should receive for this error
    pub fn output(&self) -> ErrorOutput {
        let message = if self.message.is_empty() {
            self.reason().to_string()
        } else {
            self.message.clone()
        };

        ErrorOutput {
            status_code: self.status_code,
            payload: ErrorPayload {
                status_code: self.status_code,
                error: self.reason().to_string(),
                message,
                data: self.data.clone(),
            },
        }
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status_code)
    }
}

impl std::error::Error for StructuredError {}

/// Client-facing rendition of a [`StructuredError`]
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorOutput {
    pub status_code: u16,
    pub payload: ErrorPayload,
}

/// JSON body written for classified errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub status_code: u16,
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: ErrorData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Option<ErrorData> {
        value.as_object().cloned()
    }

    #[test]
    fn test_new_passes_inputs_through() {
        let err = StructuredError::new(400, "Bad input", data(json!({"field": "x"})));

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Bad input");
        assert_eq!(err.data().get("field"), Some(&json!("x")));
    }

    #[test]
    fn test_missing_data_defaults_to_empty_map() {
        let err = StructuredError::new(404, "Nope", None);
        assert!(err.data().is_empty());
    }

    #[test]
    fn test_status_code_is_not_validated() {
        let err = StructuredError::new(42, "odd", None);
        assert_eq!(err.status_code(), 42);
        assert_eq!(err.reason(), "Unknown");
    }

    #[test]
    fn test_output_payload_shape() {
        let err = StructuredError::new(404, "Errorz!", None);
        let output = err.output();

        assert_eq!(output.status_code, 404);
        assert_eq!(
            serde_json::to_value(&output.payload).unwrap(),
            json!({"statusCode": 404, "error": "Not Found", "message": "Errorz!"})
        );
    }

    #[test]
    fn test_output_includes_non_empty_data() {
        let err = StructuredError::new(422, "Invalid", data(json!({"field": "email"})));
        let body = serde_json::to_value(err.output().payload).unwrap();

        assert_eq!(body["data"], json!({"field": "email"}));
        assert_eq!(body["error"], "Unprocessable Entity");
    }

    #[test]
    fn test_empty_message_falls_back_to_reason() {
        let err = StructuredError::new(403, "", None);
        assert_eq!(err.output().payload.message, "Forbidden");
    }

    #[test]
    fn test_display() {
        let err = StructuredError::new(409, "Conflict on save", None);
        assert_eq!(err.to_string(), "Conflict on save (409)");
    }
}
