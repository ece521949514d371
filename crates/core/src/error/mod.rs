mod builder;
mod config;
mod transport;

pub use builder::ErrorBuilder;
pub use config::ConfigError;
pub use transport::TransportError;

use thiserror::Error;

/// Main error type for everything error-cat itself can fail at.
///
/// These are failures of the facility (bad configuration, an unreachable
/// Rollbar endpoint), not the application errors it normalizes; those are
/// modelled by [`crate::CaughtError`].
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("An error-cat instance is already installed for this process")]
    AlreadyInstalled,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_display_transparently() {
        let err: Error = ConfigError::invalid_endpoint("nope", "relative URL without a base").into();
        assert_eq!(
            err.to_string(),
            "Invalid Rollbar endpoint 'nope': relative URL without a base"
        );

        let err: Error = TransportError::rejected(401, "bad token").into();
        assert_eq!(
            err.to_string(),
            "Rollbar rejected item: HTTP 401: bad token"
        );
    }
}
