//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use tipjar::alerts::DisplayHandle;
use tipjar::{HttpServer, Shutdown, TipjarConfig};

pub const ADMIN_KEY: &str = "test-admin-key";

/// Scripted stand-in for the REST backend.
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Checkout status answers, one per query; the last one repeats.
    statuses: Arc<Mutex<VecDeque<(u16, Value)>>>,
    tips: Arc<Mutex<Vec<Value>>>,
    status_delay_ms: Arc<AtomicU64>,
    pub status_calls: Arc<AtomicU32>,
    pub tip_calls: Arc<AtomicU32>,
    pub last_session_id: Arc<Mutex<Option<String>>>,
}

impl MockBackend {
    pub fn push_status(&self, code: u16, body: Value) {
        self.statuses.lock().unwrap().push_back((code, body));
    }

    /// Make every checkout status answer take `delay` first.
    pub fn set_status_delay(&self, delay: Duration) {
        self.status_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set_tips(&self, tips: Vec<Value>) {
        *self.tips.lock().unwrap() = tips;
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn tip_calls(&self) -> u32 {
        self.tip_calls.load(Ordering::SeqCst)
    }

    /// Serve the mock on an ephemeral port and return its base URL.
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/api/checkout/status/{session_id}", get(checkout_status))
            .route("/api/tips/recent", get(recent_tips))
            .route("/api/creator", get(creator))
            .route("/api/checkout/session", post(create_session))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{}", addr)
    }
}

pub fn checkout_status_body(status: &str, payment_status: &str, amount: f64) -> Value {
    json!({
        "session_id": "cs_test_123",
        "status": status,
        "payment_status": payment_status,
        "amount": amount,
        "currency": "usd",
    })
}

async fn checkout_status(
    State(mock): State<MockBackend>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    mock.status_calls.fetch_add(1, Ordering::SeqCst);
    *mock.last_session_id.lock().unwrap() = Some(session_id);

    let delay = mock.status_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let (code, body) = {
        let mut statuses = mock.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            statuses
                .front()
                .cloned()
                .unwrap_or((200, checkout_status_body("open", "unpaid", 0.0)))
        }
    };
    (StatusCode::from_u16(code).unwrap(), Json(body))
}

#[derive(Deserialize)]
struct LimitParams {
    limit: usize,
}

async fn recent_tips(
    State(mock): State<MockBackend>,
    Query(params): Query<LimitParams>,
) -> Json<Vec<Value>> {
    mock.tip_calls.fetch_add(1, Ordering::SeqCst);
    let tips = mock.tips.lock().unwrap();
    Json(tips.iter().take(params.limit).cloned().collect())
}

async fn creator() -> Json<Value> {
    Json(json!({
        "name": "Your Creator Name",
        "bio": "Support me with a tip!",
        "avatar_url": "https://example.com/avatar.png",
        "social_links": {"twitch": "https://twitch.tv/example"},
    }))
}

async fn create_session(Json(body): Json<Value>) -> impl IntoResponse {
    if body["amount"].as_f64().unwrap_or(0.0) <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Amount must be greater than 0"})),
        );
    }
    let origin = body["origin_url"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "url": format!("https://checkout.example.com/pay/cs_test_123?return={}", origin),
            "session_id": "cs_test_123",
        })),
    )
}

/// Config tuned for fast tests against `backend_url`.
pub fn test_config(backend_url: &str) -> TipjarConfig {
    let mut config = TipjarConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.backend.base_url = backend_url.to_string();
    config.backend.request_timeout_secs = 2;
    config.payment.poll_interval_ms = 20;
    config.alerts.poll_interval_ms = 50;
    config.alerts.enter_ms = 50;
    config.alerts.hold_ms = 400;
    config.alerts.exit_ms = 50;
    config.admin.api_key = ADMIN_KEY.into();
    config
}

pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub display: DisplayHandle,
    pub task: tokio::task::JoinHandle<()>,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn start_server(config: TipjarConfig) -> RunningServer {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let display = server.display();
    let serving = server.run(listener, &shutdown);

    let task = tokio::spawn(async move {
        serving.await.unwrap();
    });

    RunningServer {
        addr,
        shutdown,
        display,
        task,
    }
}

/// Poll `check` every 10ms until it holds or `timeout` passes.
pub async fn eventually<F: FnMut() -> bool>(timeout: Duration, mut check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
