//! Effect handlers for the runtime.
//!
//! Handlers perform I/O or wait on timers; they never touch state. Results
//! come back as `CartEvent`s through the inbox.

use std::time::Duration;

use cart_core::ActionError;
use cart_core::SubscriptionError;
use cart_core::ports::{CreditRecord, CreditSink};
use tokio_util::sync::CancellationToken;

use crate::common::{GateId, SubscriptionId};
use crate::events::{ActionEvent, CartEvent, CreditEvent};
use crate::runtime::inbox::CartEventSender;

/// Waits out the click gate unless it is cancelled first.
pub async fn click_gate(id: GateId, delay: Duration, cancel: CancellationToken) -> CartEvent {
    let result = tokio::select! {
        () = tokio::time::sleep(delay) => Ok(()),
        () = cancel.cancelled() => Err(ActionError::GateClosed),
    };
    CartEvent::Action(ActionEvent::GateFinished { id, result })
}

/// Forwards subscription pushes into the inbox, tagged with their
/// subscription id.
pub struct InboxCreditSink {
    id: SubscriptionId,
    tx: CartEventSender,
}

impl InboxCreditSink {
    pub fn new(id: SubscriptionId, tx: CartEventSender) -> Self {
        Self { id, tx }
    }

    fn send(&self, event: CreditEvent) {
        if self.tx.send(CartEvent::Credit(event)).is_err() {
            tracing::debug!(id = ?self.id, "credit push after runtime shut down");
        }
    }
}

impl CreditSink for InboxCreditSink {
    fn value(&self, record: CreditRecord) {
        self.send(CreditEvent::Value {
            id: self.id,
            record,
        });
    }

    fn error(&self, error: SubscriptionError) {
        self.send(CreditEvent::Error {
            id: self.id,
            error,
        });
    }
}
