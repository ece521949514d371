//! End-to-end tests for create → log → report against a mock Rollbar API

use error_cat::ErrorCat;
use integration_tests::common::{
    accept_items, config_for, data, production_env, rollbar_client_for, test_env, ROLLBAR_PATH,
};
use integration_tests::{json, CaughtError, Duration};
use mockito::{Matcher, Server};

#[tokio::test]
async fn test_create_in_production_reports_once_with_custom_data() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", ROLLBAR_PATH)
        .match_header("X-Rollbar-Access-Token", "abc123")
        .match_body(Matcher::PartialJson(json!({
            "access_token": "abc123",
            "data": {
                "level": "error",
                "custom": {"field": "x"},
                "body": {"trace": {"exception": {"class": "StructuredError", "message": "Bad input"}}}
            }
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let client = rollbar_client_for(&server);
    let cat = ErrorCat::builder()
        .config(config_for(&server))
        .environment(production_env())
        .reporter(client.clone())
        .build()
        .unwrap();

    let error = cat.create(400, "Bad input", data(json!({"field": "x"})));
    assert_eq!(error.status_code(), 400);

    assert!(client.drain(Duration::from_secs(5)).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_test_designation_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = accept_items(&mut server, 0).await;

    let client = rollbar_client_for(&server);
    let cat = ErrorCat::builder()
        .config(config_for(&server))
        .environment(test_env())
        .reporter(client.clone())
        .build()
        .unwrap();

    cat.create(500, "quiet", None);
    cat.report(&CaughtError::empty());

    assert!(!client.is_initialized());
    assert_eq!(client.in_flight(), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unclassified_error_reports_empty_custom() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", ROLLBAR_PATH)
        .match_body(Matcher::PartialJson(json!({
            "data": {
                "custom": {},
                "body": {"trace": {"exception": {"class": "Error", "message": "socket closed"}}}
            }
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let client = rollbar_client_for(&server);
    let cat = ErrorCat::builder()
        .config(config_for(&server))
        .environment(production_env())
        .reporter(client.clone())
        .build()
        .unwrap();

    cat.log(&CaughtError::unclassified(anyhow::anyhow!("socket closed")));

    assert!(client.drain(Duration::from_secs(5)).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unclassified_error_data_reaches_custom() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", ROLLBAR_PATH)
        .match_body(Matcher::PartialJson(json!({
            "data": {"custom": {"some": "data"}}
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let client = rollbar_client_for(&server);
    let cat = ErrorCat::builder()
        .config(config_for(&server))
        .environment(production_env())
        .reporter(client.clone())
        .build()
        .unwrap();

    let attached = data(json!({"some": "data"})).unwrap();
    cat.log(&CaughtError::unclassified_with_data(
        anyhow::anyhow!("socket closed"),
        attached,
    ));

    assert!(client.drain(Duration::from_secs(5)).await);
    mock.assert_async().await;
}

/// The credential is handed to the reporter only at construction. Opening
/// the gate afterwards makes reports eligible, but the client was never
/// initialized, so each one is dropped with a warning.
#[tokio::test]
async fn test_gate_opened_after_construction_drops_reports() {
    let mut server = Server::new_async().await;
    let mock = accept_items(&mut server, 0).await;

    let env = test_env();
    let client = rollbar_client_for(&server);
    let cat = ErrorCat::builder()
        .config(config_for(&server))
        .environment(env.clone())
        .reporter(client.clone())
        .build()
        .unwrap();
    assert!(!cat.can_use_rollbar());

    env.set("APP_ENV", "production");
    assert!(cat.can_use_rollbar());

    cat.create(500, "late", None);
    cat.report(&CaughtError::empty());

    assert!(!client.is_initialized());
    assert_eq!(client.in_flight(), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rollbar_outage_does_not_reach_caller() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", ROLLBAR_PATH)
        .with_status(503)
        .with_body("maintenance")
        .expect(2)
        .create_async()
        .await;

    let client = rollbar_client_for(&server);
    let cat = ErrorCat::builder()
        .config(config_for(&server))
        .environment(production_env())
        .reporter(client.clone())
        .build()
        .unwrap();

    let first = cat.create(502, "upstream down", None);
    let second = cat.create(504, "upstream slow", None);
    assert_eq!(first.status_code(), 502);
    assert_eq!(second.status_code(), 504);

    assert!(client.drain(Duration::from_secs(5)).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_builder_creates_rollbar_client_from_config() {
    let mut server = Server::new_async().await;
    let mock = accept_items(&mut server, 1).await;

    let cat = ErrorCat::builder()
        .config(config_for(&server))
        .environment(production_env())
        .build()
        .unwrap();

    cat.create(409, "Conflict", None);

    // The built-in client is private to the instance; poll the mock instead.
    let mut delivered = false;
    for _ in 0..50 {
        if mock.matched_async().await {
            delivered = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(delivered, "report never reached the mock Rollbar endpoint");
}
