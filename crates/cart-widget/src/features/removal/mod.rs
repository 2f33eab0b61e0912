//! Removal animation: a staggered upward shift of everything below a removed
//! item, completed by exactly one transition on the container.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──request──▶ Animating ──container transform end──▶ Idle (+ item-deleted)
//!                      │
//!                      └──request──▶ Animating (pending payload overwritten)
//! ```
//!
//! Completion is keyed off the container's transform transition only. The
//! items transition concurrently and would otherwise fire the deletion
//! several times, or before the gap has fully closed.

mod state;
mod update;

pub use state::{
    CascadePlan, DeleteRequest, PendingDeletion, RemovalPhase, RemovalState, plan_cascade,
};
pub use update::{handle_transition_end, request_removal, reset_animation};
