//! Integration tests library for error-cat
//!
//! This crate contains shared utilities and helpers for integration testing.

pub mod common;

// Re-export commonly used types for tests
pub use error_cat::{
    BufferedResponse, CaughtError, Config, CrashReporter, ErrorCat, ReportPayload, RollbarClient,
    RollbarConfig, StaticEnv, StructuredError,
};
pub use serde_json::{json, Value};
pub use std::sync::Arc;
pub use std::time::Duration;
