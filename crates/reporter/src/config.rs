use error_cat_core::constants::{DEFAULT_ROLLBAR_ENDPOINT, DEFAULT_ROLLBAR_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Rollbar transport
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RollbarConfig {
    /// Item endpoint the reports are posted to
    pub endpoint: String,
    /// Environment name attached to every item
    pub environment: String,
    /// Timeout for a single request
    pub timeout_secs: u64,
    /// User agent sent with requests
    pub user_agent: String,
}

impl Default for RollbarConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ROLLBAR_ENDPOINT.to_string(),
            environment: "production".to_string(),
            timeout_secs: DEFAULT_ROLLBAR_TIMEOUT_SECS,
            user_agent: format!("error-cat/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RollbarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
