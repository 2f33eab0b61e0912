//! Coordinator reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects in order.

use crate::actions;
use crate::credit;
use crate::effects::CartEffect;
use crate::events::{ActionEvent, CartEvent, CreditEvent, RemovalEvent};
use crate::items;
use crate::removal;
use crate::state::CartState;

/// The main reducer function.
pub fn update(state: &mut CartState, event: CartEvent) -> Vec<CartEffect> {
    match event {
        CartEvent::SlotChanged { nodes } => items::handle_slot_changed(&mut state.items, &nodes),
        CartEvent::Removal(event) => handle_removal_event(state, event),
        CartEvent::IdentityChanged(identity) => credit::handle_identity_changed(
            &mut state.credit,
            &mut state.ids,
            &state.config.credit,
            identity,
        ),
        CartEvent::Credit(event) => handle_credit_event(state, event),
        CartEvent::Action(event) => handle_action_event(state, event),
        CartEvent::SubtotalChanged(subtotal) => {
            state.subtotal = subtotal;
            vec![]
        }
        CartEvent::DisabledChanged(disabled) => {
            state.disabled = disabled;
            vec![]
        }
        CartEvent::OpenRequested => vec![CartEffect::OpenOverlay],
        CartEvent::ResetRequested => {
            let mut effects = teardown(state);
            effects.push(CartEffect::ResetOverlay);
            effects
        }
        CartEvent::OverlayReset => teardown(state),
    }
}

fn handle_removal_event(state: &mut CartState, event: RemovalEvent) -> Vec<CartEffect> {
    match event {
        RemovalEvent::Requested { request, height } => removal::request_removal(
            &mut state.removal,
            &state.items,
            &state.config.animation,
            request,
            height,
        ),
        RemovalEvent::TransitionEnd { target, property } => {
            removal::handle_transition_end(&mut state.removal, target, &property)
        }
    }
}

fn handle_credit_event(state: &mut CartState, event: CreditEvent) -> Vec<CartEffect> {
    match event {
        CreditEvent::Opened { id, handle } => credit::handle_opened(&mut state.credit, id, handle),
        CreditEvent::Value { id, record } => {
            credit::handle_value(&mut state.credit, id, record);
            vec![]
        }
        CreditEvent::Error { id, error } => credit::handle_error(&mut state.credit, id, error),
    }
}

fn handle_action_event(state: &mut CartState, event: ActionEvent) -> Vec<CartEffect> {
    match event {
        ActionEvent::Clicked { action, at } => {
            actions::handle_click(&mut state.actions, &mut state.ids, action, at)
        }
        ActionEvent::GateStarted { id, cancel } => {
            actions::handle_gate_started(&mut state.actions, id, cancel)
        }
        ActionEvent::GateFinished { id, result } => {
            actions::handle_gate_finished(&mut state.actions, id, result, &state.subtotal)
        }
    }
}

/// Closes the credit subscription, drops any pending deletion and cancels
/// in-flight click gates. Safe to run with nothing active.
fn teardown(state: &mut CartState) -> Vec<CartEffect> {
    if state.removal.pending().is_some() {
        tracing::debug!("reset dropped a pending removal");
    }
    state.removal.clear();
    let mut effects = credit::reset(&mut state.credit);
    effects.extend(actions::cancel_gates(&state.actions));
    effects
}
