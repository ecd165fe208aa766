//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build backend client + display → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast → server stops accepting, poller and display exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
