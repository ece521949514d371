//! Error normalization and reporting for HTTP servers.
//!
//! Two paths share one [`ErrorCat`] instance:
//!
//! - `create` → `log` → { `debug`, `report` }: build a classified error,
//!   trace it locally and forward it to Rollbar when the environment allows.
//! - `respond`: turn any error into one status line and one JSON body.

pub mod config;
pub mod diagnostics;
pub mod error_cat;
pub mod gate;
pub mod logging;
pub mod responder;

pub use config::Config;
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use error_cat::{ErrorCat, ErrorCatBuilder, ResponderFn};
pub use gate::ReportingGate;
pub use logging::init_tracing;
pub use responder::{BufferedResponse, ResponseSink};

// Re-export the error model so hosts need a single dependency
pub use error_cat_core::{CaughtError, Environment, ErrorData, ProcessEnv, StaticEnv, StructuredError};
pub use error_cat_reporter::{CrashReporter, ReportPayload, RollbarClient, RollbarConfig};
