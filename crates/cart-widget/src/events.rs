//! Cart event types.
//!
//! Every input to the coordinator is converted to a `CartEvent` before the
//! reducer sees it. Host callbacks arrive through [`HostCommand`], which the
//! runtime translates (stamping time, sampling geometry). Async results
//! (subscription pushes, click-gate acknowledgements) arrive through the
//! runtime's inbox.
//!
//! ## Stale Signals
//!
//! Subscription pushes and gate results carry the id they were issued
//! under. The reducer drops anything whose id no longer matches its state.
//!
//! [`HostCommand`]: crate::runtime::HostCommand

use cart_core::ports::{CreditRecord, SlotNode, StyleProperty, StyleTarget, Unsubscribe};
use cart_core::{ActionError, SubscriptionError};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::actions::GatedAction;
use crate::common::{GateId, SubscriptionId};
use crate::credit::UserIdentity;
use crate::removal::DeleteRequest;

/// Removal animation events.
#[derive(Debug)]
pub enum RemovalEvent {
    /// Host asked to remove an item; `height` was sampled at request time.
    Requested { request: DeleteRequest, height: f32 },
    /// A style transition finished on the rendering surface.
    TransitionEnd {
        target: StyleTarget,
        property: StyleProperty,
    },
}

/// Credit subscription events.
#[derive(Debug)]
pub enum CreditEvent {
    /// The service accepted a subscription and handed back its teardown.
    Opened {
        id: SubscriptionId,
        handle: Unsubscribe,
    },
    Value {
        id: SubscriptionId,
        record: CreditRecord,
    },
    Error {
        id: SubscriptionId,
        error: SubscriptionError,
    },
}

/// Debounced action events.
#[derive(Debug)]
pub enum ActionEvent {
    Clicked { action: GatedAction, at: Instant },
    /// The runtime spawned the gate task for an accepted click.
    GateStarted {
        id: GateId,
        cancel: Option<CancellationToken>,
    },
    /// The gate acknowledged the click, or was cancelled.
    GateFinished {
        id: GateId,
        result: Result<(), ActionError>,
    },
}

/// Unified event enum for the coordinator.
#[derive(Debug)]
pub enum CartEvent {
    /// Slot content changed; nodes are in document order.
    SlotChanged { nodes: Vec<SlotNode> },
    Removal(RemovalEvent),
    IdentityChanged(Option<UserIdentity>),
    Credit(CreditEvent),
    Action(ActionEvent),
    /// Host-formatted subtotal, e.g. `"42.00"`.
    SubtotalChanged(String),
    DisabledChanged(bool),
    OpenRequested,
    /// Full reset requested by the host (also resets the overlay).
    ResetRequested,
    /// The overlay reset itself.
    OverlayReset,
}
