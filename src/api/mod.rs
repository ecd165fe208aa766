//! Backend API subsystem.
//!
//! # Data Flow
//! ```text
//! payments poller ──┐
//!                   ├─▶ client.rs (reqwest, timeout) ──▶ REST backend /api/*
//! alerts poller ────┘        │
//!                            ▼
//!                  types.rs (serde wire types, ApiError)
//! ```

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{
    ApiError, ApiResult, CheckoutRequest, CheckoutSession, CheckoutStatus, CreatorProfile, TipEvent,
};
