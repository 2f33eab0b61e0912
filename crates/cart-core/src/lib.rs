//! Collaborator contracts and ambient plumbing for the cart widget.
//!
//! The coordinator in `cart-widget` never talks to a browser, a database or a
//! log backend directly. It talks to the ports defined here:
//!
//! - [`ports::RenderSurface`]: slot contents, geometry and inline styles
//! - [`ports::CreditService`]: push subscription to a user's credit record
//! - [`ports::Overlay`]: the modal overlay hosting the cart
//! - [`ports::ReportSink`]: operator-visible error reporting
//!
//! [`memory`] carries headless implementations of each port.

pub mod config;
pub mod error;
pub mod logging;
pub mod memory;
pub mod ports;

pub use config::CartConfig;
pub use error::{ActionError, CartError, SubscriptionError};
