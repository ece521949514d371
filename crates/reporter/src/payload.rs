use error_cat_core::{CaughtError, ErrorData};
use serde::{Deserialize, Serialize};

/// Contextual data sent alongside an error report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub custom: ErrorData,
}

impl ReportPayload {
    /// `{ "custom": data }` when the error carries data, `{ "custom": {} }` otherwise
    pub fn for_error(error: &CaughtError) -> Self {
        Self {
            custom: error.data().cloned().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_cat_core::StructuredError;
    use serde_json::json;

    #[test]
    fn test_payload_wraps_error_data() {
        let data = json!({"some": "data"}).as_object().cloned();
        let error: CaughtError = StructuredError::new(400, "Bad", data).into();

        let payload = ReportPayload::for_error(&error);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"custom": {"some": "data"}})
        );
    }

    #[test]
    fn test_payload_wraps_unclassified_error_data() {
        let data = json!({"some": "data"}).as_object().cloned().unwrap();
        let error = CaughtError::unclassified_with_data(anyhow::anyhow!("boom"), data);

        let payload = ReportPayload::for_error(&error);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"custom": {"some": "data"}})
        );
    }

    #[test]
    fn test_payload_is_empty_object_without_data() {
        let payload = ReportPayload::for_error(&CaughtError::empty());
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"custom": {}}));

        let payload = ReportPayload::for_error(&StructuredError::new(500, "x", None).into());
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"custom": {}}));
    }
}
