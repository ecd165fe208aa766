//! Tip jar overlay service library.

pub mod admin;
pub mod alerts;
pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod payments;

pub use config::schema::TipjarConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
