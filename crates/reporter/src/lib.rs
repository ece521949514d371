pub mod config;
mod error_handling;
pub mod payload;
pub mod rollbar;
pub mod transport;

pub use config::RollbarConfig;
pub use payload::ReportPayload;
pub use rollbar::RollbarClient;
pub use transport::CrashReporter;
