//! Cart effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover styling, subscription I/O, task spawning and outbound
//! notifications; the reducer never touches a collaborator directly.

use cart_core::SubscriptionError;
use cart_core::ports::{CreditKey, StyleTarget, Transition, Unsubscribe};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::actions::GatedAction;
use crate::common::{GateId, SubscriptionId};

/// Inline style change on the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOp {
    /// `None` means `transition: none`.
    SetTransition {
        target: StyleTarget,
        transition: Option<Transition>,
    },
    /// `None` clears the transform.
    SetTransform {
        target: StyleTarget,
        translate_y: Option<f32>,
    },
}

/// Events emitted to listeners outside the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum CartNotification {
    /// The removal cascade finished; carries the caller's metadata.
    ItemDeleted { metadata: serde_json::Value },
    CheckoutRequested { subtotal: String },
}

impl CartNotification {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ItemDeleted { .. } => "cart-item-deleted",
            Self::CheckoutRequested { .. } => "cart-checkout-button-clicked",
        }
    }
}

/// Effects returned by the reducer for the runtime to execute, in order.
#[derive(Debug)]
pub enum CartEffect {
    Style(StyleOp),

    /// Pin the cart's minimum height to its current rendered height.
    PinContainerHeight,

    /// Open a credit subscription; the runtime answers with
    /// `CreditEvent::Opened` carrying the same id.
    Subscribe { id: SubscriptionId, key: CreditKey },

    /// Tear down a subscription.
    Unsubscribe { handle: Unsubscribe },

    /// Forward an error to the report sink.
    Report {
        source: &'static str,
        error: SubscriptionError,
    },

    /// Wait for the click gate, then answer with `ActionEvent::GateFinished`.
    StartClickGate { id: GateId, action: GatedAction },

    /// Cancel an in-flight click gate.
    CancelGate { token: Option<CancellationToken> },

    Notify(CartNotification),

    OpenOverlay,
    CloseOverlay,
    ResetOverlay,
}
