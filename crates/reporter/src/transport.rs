use error_cat_core::{CaughtError, Result};
use std::sync::Arc;

use crate::ReportPayload;

/// Client for an external crash-reporting service.
///
/// `report_error` is fire-and-forget: implementations dispatch the send in
/// the background and swallow failures after logging them.
pub trait CrashReporter: Send + Sync {
    /// Configure the transport with its credential. Called once per process.
    fn init(&self, credential: &str) -> Result<()>;

    /// Forward one error with its payload
    fn report_error(&self, error: &CaughtError, payload: ReportPayload);
}

impl<T: CrashReporter + ?Sized> CrashReporter for Arc<T> {
    fn init(&self, credential: &str) -> Result<()> {
        (**self).init(credential)
    }

    fn report_error(&self, error: &CaughtError, payload: ReportPayload) {
        (**self).report_error(error, payload)
    }
}
