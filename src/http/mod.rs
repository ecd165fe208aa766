//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → /overlay/state, /overlay/ws (websocket.rs) ← AlertDisplay frames
//!     → /success → PaymentConfirmationPoller → PaymentView
//!     → /admin/* (admin module, bearer auth) → DisplayHandle
//! ```

pub mod error;
pub mod server;
pub mod websocket;

pub use server::{AppState, HttpServer};
