//! Actions reducer.

use cart_core::ActionError;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::actions::{ActionsState, GatedAction};
use crate::common::{GateId, IdSeq};
use crate::effects::{CartEffect, CartNotification};

/// Debounced clicks are expected and dropped; anything else is logged.
fn log_failure(action: GatedAction, error: ActionError) {
    match error {
        ActionError::Debounced => tracing::trace!(?action, "click debounced"),
        other => tracing::error!(?action, error = %other, "cart action failed"),
    }
}

pub fn handle_click(
    actions: &mut ActionsState,
    ids: &mut IdSeq,
    action: GatedAction,
    at: Instant,
) -> Vec<CartEffect> {
    match actions.debouncer.guard(at, || ids.next_gate()) {
        Ok(id) => {
            actions.track(id, action);
            vec![CartEffect::StartClickGate { id, action }]
        }
        Err(error) => {
            log_failure(action, error);
            vec![]
        }
    }
}

pub fn handle_gate_started(
    actions: &mut ActionsState,
    id: GateId,
    cancel: Option<CancellationToken>,
) -> Vec<CartEffect> {
    if actions.on_started(id, cancel.clone()) {
        vec![]
    } else {
        vec![CartEffect::CancelGate { token: cancel }]
    }
}

/// Runs the gated action once its gate acknowledges the click.
///
/// `subtotal` is read at acknowledgement time, not click time.
pub fn handle_gate_finished(
    actions: &mut ActionsState,
    id: GateId,
    result: Result<(), ActionError>,
    subtotal: &str,
) -> Vec<CartEffect> {
    let Some(action) = actions.finish(id) else {
        return vec![];
    };
    if let Err(error) = result {
        log_failure(action, error);
        return vec![];
    }

    match action {
        GatedAction::Checkout => vec![CartEffect::Notify(CartNotification::CheckoutRequested {
            subtotal: subtotal.to_string(),
        })],
        GatedAction::ContinueShopping => vec![CartEffect::CloseOverlay],
    }
}

/// Cancels every in-flight gate. Their failures still arrive through
/// `handle_gate_finished`.
pub fn cancel_gates(actions: &ActionsState) -> Vec<CartEffect> {
    actions
        .gates()
        .iter()
        .map(|gate| CartEffect::CancelGate {
            token: gate.cancel.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn gate_id(effects: &[CartEffect]) -> GateId {
        match effects {
            [CartEffect::StartClickGate { id, .. }] => *id,
            other => panic!("expected a single gate, got {other:?}"),
        }
    }

    #[test]
    fn test_double_click_starts_one_gate() {
        let mut actions = ActionsState::new(Duration::from_millis(300));
        let mut ids = IdSeq::default();
        let now = Instant::now();

        let first = handle_click(&mut actions, &mut ids, GatedAction::Checkout, now);
        let second = handle_click(&mut actions, &mut ids, GatedAction::Checkout, now);

        gate_id(&first);
        assert!(second.is_empty());
        assert_eq!(actions.gates().len(), 1);
    }

    #[test]
    fn test_checkout_gate_emits_subtotal() {
        let mut actions = ActionsState::new(Duration::from_millis(300));
        let mut ids = IdSeq::default();
        let id = gate_id(&handle_click(
            &mut actions,
            &mut ids,
            GatedAction::Checkout,
            Instant::now(),
        ));

        let effects = handle_gate_finished(&mut actions, id, Ok(()), "42.00");

        assert!(matches!(
            effects.as_slice(),
            [CartEffect::Notify(CartNotification::CheckoutRequested { subtotal })]
                if subtotal == "42.00"
        ));
        assert!(handle_gate_finished(&mut actions, id, Ok(()), "42.00").is_empty());
    }

    #[test]
    fn test_continue_shopping_closes_overlay() {
        let mut actions = ActionsState::new(Duration::from_millis(300));
        let mut ids = IdSeq::default();
        let id = gate_id(&handle_click(
            &mut actions,
            &mut ids,
            GatedAction::ContinueShopping,
            Instant::now(),
        ));

        let effects = handle_gate_finished(&mut actions, id, Ok(()), "0.00");
        assert!(matches!(effects.as_slice(), [CartEffect::CloseOverlay]));
    }

    #[test]
    fn test_closed_gate_runs_nothing() {
        let mut actions = ActionsState::new(Duration::from_millis(300));
        let mut ids = IdSeq::default();
        let id = gate_id(&handle_click(
            &mut actions,
            &mut ids,
            GatedAction::Checkout,
            Instant::now(),
        ));
        let token = CancellationToken::new();
        assert!(handle_gate_started(&mut actions, id, Some(token.clone())).is_empty());

        let cancels = cancel_gates(&actions);
        assert!(matches!(
            cancels.as_slice(),
            [CartEffect::CancelGate { token: Some(_) }]
        ));

        let effects =
            handle_gate_finished(&mut actions, id, Err(ActionError::GateClosed), "1.00");
        assert!(effects.is_empty());
        assert!(!actions.is_gate_running());
    }

    #[test]
    fn test_untracked_gate_start_is_cancelled() {
        let mut actions = ActionsState::new(Duration::from_millis(300));
        let effects = handle_gate_started(&mut actions, GateId(9), Some(CancellationToken::new()));
        assert!(matches!(
            effects.as_slice(),
            [CartEffect::CancelGate { token: Some(_) }]
        ));
    }
}
