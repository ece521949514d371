use error_cat_core::{CaughtError, Environment, Error, ErrorData, ProcessEnv, Result, StructuredError};
use error_cat_reporter::{CrashReporter, ReportPayload, RollbarClient};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::gate::ReportingGate;
use crate::responder::{self, ResponseSink};

static INSTANCE: OnceLock<ErrorCat> = OnceLock::new();

/// Framework-level error handler signature, see [`ErrorCat::responder`]
pub type ResponderFn<Req> = fn(&CaughtError, &Req, &mut dyn ResponseSink);

/// Error normalization and reporting for one process.
///
/// Create one at startup, share it by reference, or install it as the
/// process-wide instance with [`ErrorCat::install`]. It has no mutators:
/// everything that can change (reporting eligibility) is read from the
/// environment on each call.
pub struct ErrorCat {
    env: Arc<dyn Environment>,
    gate: ReportingGate,
    reporter: Arc<dyn CrashReporter>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ErrorCat {
    /// Construct and, when reporting is eligible right now, initialize the
    /// reporter with the credential. Initialization happens only here: if
    /// the gate opens later, reports reach an uninitialized reporter and are
    /// dropped with a warning.
    pub fn new(
        gate: ReportingGate,
        env: Arc<dyn Environment>,
        reporter: Arc<dyn CrashReporter>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        let cat = Self {
            env,
            gate,
            reporter,
            diagnostics,
        };

        if cat.can_use_rollbar() {
            match cat.gate.credential(cat.env.as_ref()) {
                Some(credential) => match cat.reporter.init(&credential) {
                    Ok(()) => info!("Crash reporting enabled"),
                    Err(e) => warn!(error = %e, "Failed to initialize crash reporting"),
                },
                None => debug!("Credential disappeared before init, reporting stays off"),
            }
        } else {
            debug!("Crash reporting disabled for this environment");
        }

        cat
    }

    pub fn builder() -> ErrorCatBuilder {
        ErrorCatBuilder::default()
    }

    /// Install the process-wide instance.
    ///
    /// `factory` runs only if nothing is installed yet. Any later call fails
    /// with [`Error::AlreadyInstalled`] and leaves the first instance in place.
    pub fn install<F>(factory: F) -> Result<&'static ErrorCat>
    where
        F: FnOnce() -> ErrorCat,
    {
        let mut installed = false;
        let instance = INSTANCE.get_or_init(|| {
            installed = true;
            factory()
        });

        if installed {
            Ok(instance)
        } else {
            Err(Error::AlreadyInstalled)
        }
    }

    /// The installed process-wide instance, if any
    pub fn instance() -> Option<&'static ErrorCat> {
        INSTANCE.get()
    }

    /// Static error handler for registration with an HTTP framework.
    ///
    /// Forwards to the installed instance. Responding needs no state, so the
    /// same response is written when nothing is installed yet.
    pub fn responder<Req: ?Sized>(
        error: &CaughtError,
        request: &Req,
        response: &mut dyn ResponseSink,
    ) {
        match Self::instance() {
            Some(cat) => cat.respond(error, request, response),
            None => responder::respond(error, response),
        }
    }

    /// Whether errors would be forwarded to Rollbar right now
    pub fn can_use_rollbar(&self) -> bool {
        self.gate.can_report(self.env.as_ref())
    }

    /// Build a classified error and log it. No status code validation.
    pub fn create(
        &self,
        status_code: u16,
        message: impl Into<String>,
        data: Option<ErrorData>,
    ) -> StructuredError {
        let error = StructuredError::new(status_code, message, data);
        self.log(&CaughtError::Classified(error.clone()));
        error
    }

    /// Emit the local diagnostic, then report. Each step runs even if the
    /// other panics.
    pub fn log(&self, error: &CaughtError) {
        contain("debug", || self.debug(error));
        contain("report", || self.report(error));
    }

    pub fn debug(&self, error: &CaughtError) {
        self.diagnostics.debug(error);
    }

    /// Forward to the crash reporter when the gate allows it. Returns
    /// immediately; the send itself happens in the background.
    pub fn report(&self, error: &CaughtError) {
        if !self.can_use_rollbar() {
            return;
        }
        self.reporter
            .report_error(error, ReportPayload::for_error(error));
    }

    /// Write the HTTP response for `error`. Does not log or report.
    pub fn respond<Req: ?Sized>(
        &self,
        error: &CaughtError,
        _request: &Req,
        response: &mut dyn ResponseSink,
    ) {
        responder::respond(error, response);
    }
}

impl std::fmt::Debug for ErrorCat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorCat")
            .field("gate", &self.gate)
            .field("reporting", &self.can_use_rollbar())
            .finish()
    }
}

fn contain<F: FnOnce()>(channel: &'static str, f: F) {
    if panic::catch_unwind(AssertUnwindSafe(f)).is_err() {
        warn!(channel = channel, "Error side channel panicked, continuing");
    }
}

/// Assembles an [`ErrorCat`] from configuration and optional overrides
#[derive(Default)]
pub struct ErrorCatBuilder {
    config: Config,
    env: Option<Arc<dyn Environment>>,
    reporter: Option<Arc<dyn CrashReporter>>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl ErrorCatBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn environment(mut self, env: Arc<dyn Environment>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn CrashReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Build a standalone instance
    pub fn build(self) -> anyhow::Result<ErrorCat> {
        let parts = self.into_parts()?;
        Ok(parts.construct())
    }

    /// Build and install as the process-wide instance. Nothing is
    /// initialized when an instance is already installed.
    pub fn install(self) -> anyhow::Result<&'static ErrorCat> {
        let parts = self.into_parts()?;
        Ok(ErrorCat::install(move || parts.construct())?)
    }

    fn into_parts(self) -> anyhow::Result<Parts> {
        self.config.validate()?;

        let env: Arc<dyn Environment> = match self.env {
            Some(env) => env,
            None => Arc::new(ProcessEnv),
        };
        let reporter: Arc<dyn CrashReporter> = match self.reporter {
            Some(reporter) => reporter,
            None => Arc::new(RollbarClient::new(self.config.rollbar_config(env.as_ref()))?),
        };

        let diagnostics: Arc<dyn Diagnostics> = match self.diagnostics {
            Some(diagnostics) => diagnostics,
            None => Arc::new(TracingDiagnostics),
        };

        Ok(Parts {
            gate: ReportingGate::new(&self.config.gate),
            env,
            reporter,
            diagnostics,
        })
    }
}

struct Parts {
    gate: ReportingGate,
    env: Arc<dyn Environment>,
    reporter: Arc<dyn CrashReporter>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Parts {
    fn construct(self) -> ErrorCat {
        ErrorCat::new(self.gate, self.env, self.reporter, self.diagnostics)
    }
}
