//! Operator endpoints.
//!
//! Replaces the browser test dashboard: an operator (or `tipjar-cli`) can
//! push alerts onto a running overlay without going through the tip feed.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/alerts", post(present_alert))
        .route("/admin/alerts/test", post(trigger_test_alert))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
