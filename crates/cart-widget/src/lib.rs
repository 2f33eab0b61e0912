//! Presentation state coordinator for the shopping-cart widget.
//!
//! The coordinator follows an update/effect split:
//!
//! - [`events::CartEvent`]: every input (slot changes, transition ends,
//!   subscription pushes, clicks) becomes one event
//! - [`update::update`]: the only place state changes; returns effects
//! - [`effects::CartEffect`]: styling, subscription and notification work
//! - [`runtime::CartRuntime`]: owns the collaborators and executes effects
//!
//! Feature slices live under [`features`]: `items` (slot projection),
//! `removal` (cascade animation), `credit` (subscription lifecycle) and
//! `actions` (debounced clicks).

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod runtime;
pub mod state;
pub mod update;
pub mod view;

pub use effects::{CartEffect, CartNotification, StyleOp};
pub use events::CartEvent;
pub use features::{actions, credit, items, removal};
pub use runtime::{CartRuntime, Collaborators, HostCommand};
pub use state::CartState;
pub use view::CartView;
