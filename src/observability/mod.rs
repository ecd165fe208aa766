//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pollers, display, http handlers produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached to every HTTP span
//! - Feed errors are logged, never shown on the overlay

pub mod logging;
pub mod metrics;
