use thiserror::Error;

/// Problems with error-cat's own settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid setting {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Missing setting: {field}")]
    MissingField { field: String },

    #[error("Invalid Rollbar endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration file: {reason}")]
    Parse { reason: String },
}

impl ConfigError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn parse(reason: impl ToString) -> Self {
        Self::Parse {
            reason: reason.to_string(),
        }
    }
}
