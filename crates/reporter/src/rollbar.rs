//! Rollbar transport.
//!
//! Items are posted on a detached Tokio task. The caller of
//! [`CrashReporter::report_error`] never sees the outcome; failures are
//! logged and dropped, and nothing is retried.

use chrono::Utc;
use error_cat_core::{CaughtError, ErrorBuilder, Result, TransportError};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, warn};
use url::Url;

use crate::error_handling::handle_rollbar_response;
use crate::{CrashReporter, ReportPayload, RollbarConfig};

const NOTIFIER_NAME: &str = "error-cat";

/// HTTP client for the Rollbar item API
#[derive(Clone)]
pub struct RollbarClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    endpoint: Url,
    config: RollbarConfig,
    access_token: OnceLock<String>,
    in_flight: AtomicUsize,
    idle: Notify,
}

impl RollbarClient {
    pub fn new(config: RollbarConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ErrorBuilder::config().invalid_endpoint(&config.endpoint, e))?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(TransportError::from)?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                endpoint,
                config,
                access_token: OnceLock::new(),
                in_flight: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        })
    }

    pub fn config(&self) -> &RollbarConfig {
        &self.inner.config
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.access_token.get().is_some()
    }

    /// Number of reports dispatched but not yet finished
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Build the Rollbar item body for an error
    pub fn build_item(&self, error: &CaughtError, payload: &ReportPayload) -> Result<Value> {
        let token = self
            .inner
            .access_token
            .get()
            .ok_or_else(|| ErrorBuilder::transport().not_initialized())?;

        Ok(json!({
            "access_token": token,
            "data": {
                "environment": self.inner.config.environment,
                "level": "error",
                "timestamp": Utc::now().timestamp(),
                "language": "rust",
                "platform": std::env::consts::OS,
                "notifier": {
                    "name": NOTIFIER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
                "body": {
                    "trace": {
                        "frames": [],
                        "exception": {
                            "class": error.class_name(),
                            "message": error.describe(),
                        }
                    }
                },
                "custom": payload.custom,
            }
        }))
    }

    /// Post one item and wait for the answer
    pub async fn send_item(&self, item: Value) -> Result<()> {
        let token = item["access_token"].as_str().unwrap_or_default().to_string();
        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header("X-Rollbar-Access-Token", token)
            .json(&item)
            .send()
            .await
            .map_err(TransportError::from)?;

        handle_rollbar_response(response).await
    }

    /// Wait until every dispatched report has finished, or the timeout hits.
    ///
    /// Returns `false` on timeout. Individual send results stay unobservable.
    pub async fn drain(&self, timeout: Duration) -> bool {
        let wait = async {
            loop {
                let notified = self.inner.idle.notified();
                if self.in_flight() == 0 {
                    return;
                }
                notified.await;
            }
        };

        tokio::time::timeout(timeout, wait).await.is_ok()
    }

    fn finish_one(&self) {
        if self.inner.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

impl CrashReporter for RollbarClient {
    fn init(&self, credential: &str) -> Result<()> {
        if credential.is_empty() {
            return Err(ErrorBuilder::config().invalid_field("access_token", "must not be empty"));
        }

        if self.inner.access_token.set(credential.to_string()).is_err() {
            debug!("Rollbar client already initialized, keeping first access token");
        }
        Ok(())
    }

    fn report_error(&self, error: &CaughtError, payload: ReportPayload) {
        let item = match self.build_item(error, &payload) {
            Ok(item) => item,
            Err(e) => {
                warn!(error = %e, "Dropping error report");
                return;
            }
        };

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(
                    error = %TransportError::NoRuntime,
                    "Dropping error report"
                );
                return;
            }
        };

        self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        let client = self.clone();
        handle.spawn(async move {
            match client.send_item(item).await {
                Ok(()) => debug!("Error report delivered"),
                Err(e) => warn!(error = %e, "Failed to deliver error report"),
            }
            client.finish_one();
        });
    }
}

impl std::fmt::Debug for RollbarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollbarClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("environment", &self.inner.config.environment)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
