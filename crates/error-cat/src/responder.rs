//! Turning any error into exactly one HTTP status line and JSON body.

use error_cat_core::constants::{INTERNAL_SERVER_ERROR_BODY, INTERNAL_SERVER_ERROR_STATUS};
use error_cat_core::CaughtError;
use tracing::warn;

/// Outbound HTTP response as seen by the responder
pub trait ResponseSink {
    fn write_head(&mut self, status_code: u16);
    fn end(&mut self, body: String);
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn write_head(&mut self, status_code: u16) {
        (**self).write_head(status_code)
    }

    fn end(&mut self, body: String) {
        (**self).end(body)
    }
}

/// Collects the status and body in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferedResponse {
    status_code: Option<u16>,
    body: Option<String>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn is_ended(&self) -> bool {
        self.body.is_some()
    }

    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

impl ResponseSink for BufferedResponse {
    fn write_head(&mut self, status_code: u16) {
        self.status_code = Some(status_code);
    }

    fn end(&mut self, body: String) {
        self.body = Some(body);
    }
}

/// Status and serialized body for an error.
///
/// Unclassified errors always map to the fixed 500 body; their message never
/// reaches the client.
pub fn render(error: &CaughtError) -> (u16, String) {
    match error {
        CaughtError::Classified(e) => {
            let output = e.output();
            match serde_json::to_string(&output.payload) {
                Ok(body) => (output.status_code, body),
                Err(err) => {
                    warn!(error = %err, "Failed to serialize error payload, sending 500");
                    internal_server_error()
                }
            }
        }
        CaughtError::Unclassified(_) => internal_server_error(),
    }
}

/// Write one status and one body to `response`
pub fn respond<S: ResponseSink + ?Sized>(error: &CaughtError, response: &mut S) {
    let (status_code, body) = render(error);
    response.write_head(status_code);
    response.end(body);
}

fn internal_server_error() -> (u16, String) {
    (
        INTERNAL_SERVER_ERROR_STATUS,
        INTERNAL_SERVER_ERROR_BODY.to_string(),
    )
}
