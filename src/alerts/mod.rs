//! Streaming overlay alerts.
//!
//! # Data Flow
//! ```text
//! recent-tips feed ──(every poll_interval)──▶ poller.rs ──┐
//!                                             (new identity only)
//!                                                          ├─▶ DisplayHandle ─▶ display.rs ─▶ watch<AlertFrame>
//! operator (HTTP admin routes, CLI) ───────────────────────┘                                   │
//!                                                                                  /overlay/ws, /overlay/state
//! ```

pub mod display;
pub mod poller;
pub mod types;

pub use display::{AlertDisplay, DisplayHandle};
pub use poller::{AlertPoller, PollOutcome, TipFeed};
pub use types::{
    AlertError, AlertFrame, AlertKind, AlertRequest, AlertSource, AnimationPhase, TipIdentity,
};
