//! End-to-end payment confirmation through `/success`.

use std::time::Duration;

use tipjar::api::{ApiError, BackendClient, CheckoutRequest};
use tipjar::config::{validate_config, BackendConfig};
use tipjar::payments::PaymentView;

mod common;
use common::{checkout_status_body, http_client, start_server, test_config, MockBackend};

async fn confirm(server: &common::RunningServer, query: &str) -> PaymentView {
    http_client()
        .get(server.url(&format!("/success{}", query)))
        .send()
        .await
        .expect("server unreachable")
        .json()
        .await
        .expect("invalid payment view")
}

#[tokio::test]
async fn test_paid_after_retries() {
    let mock = MockBackend::default();
    mock.push_status(200, checkout_status_body("open", "unpaid", 12.5));
    mock.push_status(200, checkout_status_body("open", "unpaid", 12.5));
    mock.push_status(200, checkout_status_body("complete", "paid", 12.5));
    let backend_url = mock.start().await;
    let server = start_server(test_config(&backend_url)).await;

    let view = confirm(&server, "?session_id=cs_test_123").await;

    assert_eq!(view.status, "success");
    assert_eq!(view.title, "Thank You!");
    assert_eq!(view.message, "Your tip of $12.50 has been successfully processed.");
    assert_eq!(mock.status_calls(), 3);
    assert_eq!(mock.last_session_id.lock().unwrap().as_deref(), Some("cs_test_123"));

    // Terminal: nothing keeps polling in the background.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(mock.status_calls(), 3);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_slow_backend_still_reports_outcome() {
    let mock = MockBackend::default();
    mock.set_status_delay(Duration::from_millis(300));
    mock.push_status(200, checkout_status_body("open", "unpaid", 7.0));
    mock.push_status(200, checkout_status_body("complete", "paid", 7.0));
    let backend_url = mock.start().await;

    let mut config = test_config(&backend_url);
    config.timeouts.request_secs = 1;
    assert!(validate_config(&config).is_err());

    config.timeouts.request_secs = 13;
    assert!(validate_config(&config).is_ok());
    let server = start_server(config).await;

    let res = http_client()
        .get(server.url("/success?session_id=cs_test_123"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let view: PaymentView = res.json().await.unwrap();
    assert_eq!(view.message, "Your tip of $7.00 has been successfully processed.");
    assert_eq!(mock.status_calls(), 2);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_unresolved_session_times_out() {
    let mock = MockBackend::default();
    mock.push_status(200, checkout_status_body("open", "unpaid", 5.0));
    let backend_url = mock.start().await;
    let server = start_server(test_config(&backend_url)).await;

    let view = confirm(&server, "?session_id=cs_test_123").await;

    assert_eq!(view.status, "failed");
    assert_eq!(
        view.message,
        "Payment verification timed out. Please check your email for confirmation."
    );
    assert_eq!(mock.status_calls(), 6);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_expired_session() {
    let mock = MockBackend::default();
    mock.push_status(200, checkout_status_body("expired", "unpaid", 5.0));
    let backend_url = mock.start().await;
    let server = start_server(test_config(&backend_url)).await;

    let view = confirm(&server, "?session_id=cs_test_123").await;

    assert_eq!(view.title, "Payment Failed");
    assert_eq!(view.message, "Payment session expired");
    assert_eq!(mock.status_calls(), 1);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_backend_error_is_terminal() {
    let mock = MockBackend::default();
    mock.push_status(500, serde_json::json!({"detail": "Stripe API key not configured"}));
    let backend_url = mock.start().await;
    let server = start_server(test_config(&backend_url)).await;

    let view = confirm(&server, "?session_id=cs_test_123").await;

    assert_eq!(view.message, "Failed to verify payment status");
    assert_eq!(mock.status_calls(), 1);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_missing_session_id() {
    let mock = MockBackend::default();
    let backend_url = mock.start().await;
    let server = start_server(test_config(&backend_url)).await;

    let view = confirm(&server, "").await;

    assert_eq!(view.message, "No payment session found");
    assert_eq!(mock.status_calls(), 0);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_backend_fails() {
    // Nothing listens on port 9 locally.
    let server = start_server(test_config("http://127.0.0.1:9")).await;

    let view = confirm(&server, "?session_id=cs_test_123").await;
    assert_eq!(view.message, "Failed to verify payment status");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_backend_client_checkout_helpers() {
    let mock = MockBackend::default();
    let backend_url = mock.start().await;
    let client = BackendClient::new(&BackendConfig {
        base_url: backend_url,
        request_timeout_secs: 2,
    })
    .unwrap();

    let profile = client.creator().await.unwrap();
    assert_eq!(profile.name, "Your Creator Name");
    assert_eq!(profile.social_links.len(), 1);

    let session = client
        .create_checkout_session(&CheckoutRequest {
            amount: 5.0,
            message: Some("gg".into()),
            tipper_name: None,
            origin_url: "http://localhost:3000".into(),
        })
        .await
        .unwrap();
    assert_eq!(session.session_id.as_deref(), Some("cs_test_123"));
    assert!(session.url.starts_with("https://checkout.example.com/"));

    let err = client
        .create_checkout_session(&CheckoutRequest {
            amount: 0.0,
            message: None,
            tipper_name: None,
            origin_url: "http://localhost:3000".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 400, .. }));
}
