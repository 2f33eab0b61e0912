//! Debounced user actions (checkout, continue shopping).
//!
//! An accepted click passes through a short "click gate" (the runtime sleeps
//! for the configured acknowledgement delay) before its effect fires. Clicks
//! inside the debounce window are rejected with `ActionError::Debounced`,
//! which is swallowed; any other failure is logged.

mod state;
mod update;

pub use state::{ActionDebouncer, ActionsState, GateTask, GatedAction};
pub use update::{cancel_gates, handle_click, handle_gate_finished, handle_gate_started};
