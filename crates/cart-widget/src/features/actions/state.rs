use std::time::Duration;

use cart_core::ActionError;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::common::GateId;

/// A user action that goes through the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedAction {
    Checkout,
    ContinueShopping,
}

/// Lets one invocation through per debounce window.
#[derive(Debug, Clone)]
pub struct ActionDebouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl ActionDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Runs `action` if `now` is outside the window of the last accepted
    /// call. Only an accepted call moves the window.
    pub fn guard<T>(
        &mut self,
        now: Instant,
        action: impl FnOnce() -> T,
    ) -> Result<T, ActionError> {
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.window
        {
            return Err(ActionError::Debounced);
        }
        self.last_accepted = Some(now);
        Ok(action())
    }
}

/// An accepted click waiting on its gate.
#[derive(Debug, Clone)]
pub struct GateTask {
    pub id: GateId,
    pub action: GatedAction,
    pub cancel: Option<CancellationToken>,
}

/// Debouncer plus in-flight gates (stored here, mutated only by the reducer).
#[derive(Debug)]
pub struct ActionsState {
    pub debouncer: ActionDebouncer,
    gates: Vec<GateTask>,
}

impl ActionsState {
    pub fn new(window: Duration) -> Self {
        Self {
            debouncer: ActionDebouncer::new(window),
            gates: Vec::new(),
        }
    }

    pub fn gates(&self) -> &[GateTask] {
        &self.gates
    }

    pub fn is_gate_running(&self) -> bool {
        !self.gates.is_empty()
    }

    pub(crate) fn track(&mut self, id: GateId, action: GatedAction) {
        self.gates.push(GateTask {
            id,
            action,
            cancel: None,
        });
    }

    /// Stores the cancel token; returns false if the gate is not tracked.
    pub(crate) fn on_started(&mut self, id: GateId, cancel: Option<CancellationToken>) -> bool {
        match self.gates.iter_mut().find(|g| g.id == id) {
            Some(gate) => {
                gate.cancel = cancel;
                true
            }
            None => false,
        }
    }

    pub(crate) fn finish(&mut self, id: GateId) -> Option<GatedAction> {
        let pos = self.gates.iter().position(|g| g.id == id)?;
        Some(self.gates.remove(pos).action)
    }
}
