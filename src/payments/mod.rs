//! Payment confirmation module.
//!
//! After checkout redirects back with a session ID, the poller asks the
//! backend for the session status every `poll_interval` until the payment is
//! confirmed, the session expires, or `max_attempts` retries are used up.

pub mod poller;
pub mod types;

pub use poller::{CheckoutStatusSource, PaymentConfirmationPoller};
pub use types::{FailureReason, PaymentState, PaymentView};
