use super::{ConfigError, Error, TransportError};

/// Builder for creating errors with a fluent API
pub struct ErrorBuilder;

impl ErrorBuilder {
    /// Configuration errors
    pub fn config() -> ConfigErrorBuilder {
        ConfigErrorBuilder
    }

    /// Crash-reporting transport errors
    pub fn transport() -> TransportErrorBuilder {
        TransportErrorBuilder
    }
}

pub struct ConfigErrorBuilder;

impl ConfigErrorBuilder {
    pub fn invalid_field(self, field: impl Into<String>, reason: impl Into<String>) -> Error {
        ConfigError::invalid_field(field, reason).into()
    }

    pub fn invalid_endpoint(self, endpoint: impl Into<String>, reason: impl ToString) -> Error {
        ConfigError::invalid_endpoint(endpoint, reason).into()
    }
}

pub struct TransportErrorBuilder;

impl TransportErrorBuilder {
    pub fn rejected(self, status: u16, message: impl Into<String>) -> Error {
        TransportError::rejected(status, message).into()
    }

    pub fn not_initialized(self) -> Error {
        TransportError::NotInitialized.into()
    }
}
