/// Status used for every error that carries no HTTP classification
pub const INTERNAL_SERVER_ERROR_STATUS: u16 = 500;

/// Client-facing message for unclassified errors
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Exact body written for unclassified errors
pub const INTERNAL_SERVER_ERROR_BODY: &str = r#"{"message":"Internal Server Error"}"#;

/// Environment variable holding the runtime designation
pub const DEFAULT_ENV_VAR: &str = "APP_ENV";

/// Environment variable holding the Rollbar access token
pub const DEFAULT_KEY_VAR: &str = "ROLLBAR_KEY";

/// Runtime designation under which reporting is always off
pub const DEFAULT_TEST_DESIGNATION: &str = "test";

/// Rollbar item endpoint
pub const DEFAULT_ROLLBAR_ENDPOINT: &str = "https://api.rollbar.com/api/1/item/";

/// Timeout for a single Rollbar request, in seconds
pub const DEFAULT_ROLLBAR_TIMEOUT_SECS: u64 = 10;
