//! Common utilities for integration tests

use crate::*;
use mockito::{Mock, ServerGuard};
use std::sync::Mutex;

pub const ROLLBAR_PATH: &str = "/api/1/item/";

/// Environment in which reporting is eligible
pub fn production_env() -> Arc<StaticEnv> {
    Arc::new(
        StaticEnv::new()
            .with("APP_ENV", "production")
            .with("ROLLBAR_KEY", "abc123"),
    )
}

/// Environment in which reporting is switched off
pub fn test_env() -> Arc<StaticEnv> {
    Arc::new(
        StaticEnv::new()
            .with("APP_ENV", "test")
            .with("ROLLBAR_KEY", "abc123"),
    )
}

/// Configuration pointing the Rollbar transport at a mock server
pub fn config_for(server: &ServerGuard) -> Config {
    let mut config = Config::default();
    config.rollbar.endpoint = format!("{}{}", server.url(), ROLLBAR_PATH);
    config.rollbar.timeout_secs = 2;
    config
}

/// Real Rollbar client pointed at a mock server
pub fn rollbar_client_for(server: &ServerGuard) -> Arc<RollbarClient> {
    let config = RollbarConfig::new()
        .with_endpoint(format!("{}{}", server.url(), ROLLBAR_PATH))
        .with_environment("production");
    Arc::new(RollbarClient::new(config).expect("Failed to create RollbarClient"))
}

/// Mock that accepts any number of Rollbar items
pub async fn accept_items(server: &mut ServerGuard, expected: usize) -> Mock {
    server
        .mock("POST", ROLLBAR_PATH)
        .with_status(200)
        .with_body(r#"{"err":0,"result":{"uuid":"00000000"}}"#)
        .expect(expected)
        .create_async()
        .await
}

/// Build a data map from a JSON object literal
pub fn data(value: Value) -> Option<error_cat::ErrorData> {
    value.as_object().cloned()
}

/// Crash reporter that records what it is asked to do
#[derive(Default)]
pub struct RecordingReporter {
    inits: Mutex<Vec<String>>,
    reports: Mutex<Vec<ReportPayload>>,
}

impl RecordingReporter {
    pub fn init_count(&self) -> usize {
        self.inits.lock().unwrap().len()
    }

    pub fn payloads(&self) -> Vec<ReportPayload> {
        self.reports.lock().unwrap().clone()
    }
}

impl CrashReporter for RecordingReporter {
    fn init(&self, credential: &str) -> error_cat_core::Result<()> {
        self.inits.lock().unwrap().push(credential.to_string());
        Ok(())
    }

    fn report_error(&self, _error: &CaughtError, payload: ReportPayload) {
        self.reports.lock().unwrap().push(payload);
    }
}
