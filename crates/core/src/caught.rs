//! Error values as they arrive at the pipeline.
//!
//! Anything handed to error-cat is either classified (it knows its HTTP
//! status) or not. Consumers match on [`CaughtError`] instead of inspecting the
//! value for a status code.

use std::fmt;

use crate::structured::{ErrorData, StructuredError};

/// Any error value handed to `log`, `report` or `respond`
#[derive(Debug)]
pub enum CaughtError {
    /// Carries an intended HTTP status and safe-to-expose message/data
    Classified(StructuredError),
    /// Anything else; treated opaquely when building client responses
    Unclassified(UnclassifiedError),
}

impl CaughtError {
    /// Wrap an arbitrary error, recovering its classification when the value
    /// is a [`StructuredError`] that travelled as `anyhow::Error`.
    pub fn unclassified<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let error: anyhow::Error = error.into();
        match error.downcast::<StructuredError>() {
            Ok(structured) => CaughtError::Classified(structured),
            Err(raw) => CaughtError::Unclassified(UnclassifiedError::new(raw)),
        }
    }

    /// Like [`CaughtError::unclassified`], attaching `data` for the crash
    /// reporter. A value that turns out to be a [`StructuredError`] keeps its
    /// own data instead.
    pub fn unclassified_with_data<E>(error: E, data: ErrorData) -> Self
    where
        E: Into<anyhow::Error>,
    {
        match Self::unclassified(error) {
            CaughtError::Unclassified(e) => CaughtError::Unclassified(e.with_data(data)),
            classified => classified,
        }
    }

    /// An error with no value at all
    pub fn empty() -> Self {
        CaughtError::Unclassified(UnclassifiedError::default())
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, CaughtError::Classified(_))
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            CaughtError::Classified(e) => Some(e.status_code()),
            CaughtError::Unclassified(_) => None,
        }
    }

    pub fn data(&self) -> Option<&ErrorData> {
        match self {
            CaughtError::Classified(e) => Some(e.data()),
            CaughtError::Unclassified(e) => e.data(),
        }
    }

    /// Class name used when reporting the error externally
    pub fn class_name(&self) -> &'static str {
        match self {
            CaughtError::Classified(_) => "StructuredError",
            CaughtError::Unclassified(_) => "Error",
        }
    }

    /// Operator-facing description. Never sent to HTTP clients.
    pub fn describe(&self) -> String {
        match self {
            CaughtError::Classified(e) => e.message().to_string(),
            CaughtError::Unclassified(e) => e.to_string(),
        }
    }
}

impl fmt::Display for CaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaughtError::Classified(e) => write!(f, "{e}"),
            CaughtError::Unclassified(e) => write!(f, "{e}"),
        }
    }
}

impl From<StructuredError> for CaughtError {
    fn from(error: StructuredError) -> Self {
        CaughtError::Classified(error)
    }
}

impl From<anyhow::Error> for CaughtError {
    fn from(error: anyhow::Error) -> Self {
        CaughtError::unclassified(error)
    }
}

impl From<crate::Error> for CaughtError {
    fn from(error: crate::Error) -> Self {
        CaughtError::unclassified(error)
    }
}

/// An error without HTTP classification
///
/// `data` only ever reaches the crash reporter; client responses for
/// unclassified errors stay fixed.
#[derive(Debug, Default)]
pub struct UnclassifiedError {
    raw: Option<anyhow::Error>,
    data: Option<ErrorData>,
}

impl UnclassifiedError {
    pub fn new(raw: anyhow::Error) -> Self {
        Self {
            raw: Some(raw),
            data: None,
        }
    }

    pub fn with_data(mut self, data: ErrorData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn raw(&self) -> Option<&anyhow::Error> {
        self.raw.as_ref()
    }

    pub fn data(&self) -> Option<&ErrorData> {
        self.data.as_ref()
    }
}

impl fmt::Display for UnclassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "{raw:#}"),
            None => write!(f, "empty error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_error_is_classified() {
        let caught: CaughtError = StructuredError::new(404, "Not here", None).into();

        assert!(caught.is_classified());
        assert_eq!(caught.status_code(), Some(404));
        assert_eq!(caught.class_name(), "StructuredError");
        assert_eq!(caught.describe(), "Not here");
    }

    #[test]
    fn test_plain_error_is_unclassified() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let caught = CaughtError::unclassified(io);

        assert!(!caught.is_classified());
        assert_eq!(caught.status_code(), None);
        assert!(caught.data().is_none());
        assert_eq!(caught.class_name(), "Error");
        assert_eq!(caught.describe(), "disk on fire");
    }

    #[test]
    fn test_anyhow_wrapped_structured_error_keeps_classification() {
        let data = json!({"id": 7}).as_object().cloned();
        let err = anyhow::Error::new(StructuredError::new(409, "Taken", data));
        let caught = CaughtError::from(err);

        assert_eq!(caught.status_code(), Some(409));
        assert_eq!(caught.data().and_then(|d| d.get("id")), Some(&json!(7)));
    }

    #[test]
    fn test_unclassified_error_carries_data() {
        let data = json!({"some": "data"}).as_object().cloned().unwrap();
        let caught = CaughtError::unclassified_with_data(anyhow::anyhow!("boom"), data);

        assert!(!caught.is_classified());
        assert_eq!(caught.status_code(), None);
        assert_eq!(caught.data().and_then(|d| d.get("some")), Some(&json!("data")));
    }

    #[test]
    fn test_structured_error_keeps_own_data_over_attached() {
        let own = json!({"id": 1}).as_object().cloned();
        let attached = json!({"id": 2}).as_object().cloned().unwrap();
        let err = anyhow::Error::new(StructuredError::new(409, "Taken", own));
        let caught = CaughtError::unclassified_with_data(err, attached);

        assert!(caught.is_classified());
        assert_eq!(caught.data().and_then(|d| d.get("id")), Some(&json!(1)));
    }

    #[test]
    fn test_empty_error() {
        let caught = CaughtError::empty();

        assert!(!caught.is_classified());
        assert_eq!(caught.to_string(), "empty error");
    }

    #[test]
    fn test_facility_errors_are_unclassified() {
        let caught = CaughtError::from(crate::Error::AlreadyInstalled);
        assert!(!caught.is_classified());
    }
}
