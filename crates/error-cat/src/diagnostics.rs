use error_cat_core::CaughtError;
use tracing::debug;

/// Local, operator-facing emission of an error. No external side effects.
pub trait Diagnostics: Send + Sync {
    fn debug(&self, error: &CaughtError);
}

/// Emits one `debug` event per error under the `error_cat` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, error: &CaughtError) {
        match error {
            CaughtError::Classified(e) => debug!(
                target: "error_cat",
                status = e.status_code(),
                data = ?e.data(),
                "{}",
                e.message()
            ),
            CaughtError::Unclassified(e) => debug!(
                target: "error_cat",
                error = %e,
                "Unclassified error"
            ),
        }
    }
}
