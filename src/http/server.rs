//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Start the alert display and tip feed poller next to the server
//! - Serve until the shutdown signal fires

use std::future::Future;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::Request,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::alerts::{AlertDisplay, AlertFrame, AlertPoller, DisplayHandle, TipIdentity};
use crate::api::{ApiResult, BackendClient};
use crate::config::{AdminConfig, PaymentConfig, TipjarConfig};
use crate::http::websocket::overlay_ws;
use crate::lifecycle::Shutdown;
use crate::payments::{PaymentConfirmationPoller, PaymentView};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub display: DisplayHandle,
    pub backend: BackendClient,
    pub payment_config: PaymentConfig,
    pub admin_config: AdminConfig,
    pub last_seen: watch::Receiver<Option<TipIdentity>>,
}

/// Overlay and confirmation server.
pub struct HttpServer {
    router: Router,
    config: TipjarConfig,
    display: AlertDisplay,
    handle: DisplayHandle,
    poller: Option<AlertPoller<BackendClient>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: TipjarConfig) -> ApiResult<Self> {
        let backend = BackendClient::new(&config.backend)?;
        let (display, handle) = AlertDisplay::new(config.alerts.clone());

        let poller = AlertPoller::new(backend.clone(), handle.clone(), config.alerts.clone());
        let last_seen = poller.last_seen();
        let poller = config.alerts.enabled.then_some(poller);

        let state = AppState {
            display: handle.clone(),
            backend,
            payment_config: config.payment.clone(),
            admin_config: config.admin.clone(),
            last_seen,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            display,
            handle,
            poller,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &TipjarConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/health", get(health))
            .route("/overlay/state", get(overlay_state))
            .route("/overlay/ws", get(overlay_ws))
            .route("/success", get(confirm_payment));

        if config.admin.enabled {
            router = router.merge(setup_admin_router(state.clone()));
        }

        router.with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server and its background tasks until shutdown.
    ///
    /// Every shutdown receiver is taken before the returned future first
    /// runs, so a signal sent while it waits to be polled still stops the
    /// display and the tip poller.
    pub fn run(
        self,
        listener: TcpListener,
        shutdown: &Shutdown,
    ) -> impl Future<Output = Result<(), std::io::Error>> + Send + 'static {
        let display_shutdown = shutdown.subscribe();
        let poller_shutdown = shutdown.subscribe();
        let mut server_shutdown = shutdown.subscribe();

        async move {
            let addr = listener.local_addr()?;
            tracing::info!(address = %addr, "HTTP server starting");

            tokio::spawn(self.display.run(display_shutdown));

            match self.poller {
                Some(poller) => {
                    tokio::spawn(poller.run(poller_shutdown));
                }
                None => tracing::info!("Tip feed poller disabled"),
            }

            axum::serve(listener, self.router)
                .with_graceful_shutdown(async move {
                    let _ = server_shutdown.recv().await;
                })
                .await?;

            tracing::info!("HTTP server stopped");
            Ok::<(), std::io::Error>(())
        }
    }

    /// Handle to the display this server drives.
    pub fn display(&self) -> DisplayHandle {
        self.handle.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &TipjarConfig {
        &self.config
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn overlay_state(State(state): State<AppState>) -> Json<AlertFrame> {
    Json(state.display.current())
}

#[derive(Debug, Deserialize)]
struct SuccessParams {
    session_id: Option<String>,
}

/// Checkout return page. Holds the request until the payment resolves.
async fn confirm_payment(
    State(state): State<AppState>,
    Query(params): Query<SuccessParams>,
) -> Json<PaymentView> {
    let poller = PaymentConfirmationPoller::new(state.backend.clone(), state.payment_config.clone());
    let outcome = poller.run(params.session_id.as_deref()).await;
    Json(outcome.view())
}
