use std::time::Duration;

use cart_core::ports::NodeId;
use serde::{Deserialize, Serialize};

use crate::items::Item;

/// Host request to animate an item out of the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Position of the item in the current sequence.
    #[serde(rename = "animationIndex")]
    pub index: usize,
    /// Echoed back verbatim in `item-deleted`.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl DeleteRequest {
    pub fn new(index: usize, metadata: serde_json::Value) -> Self {
        Self { index, metadata }
    }
}

/// The removal currently being animated.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDeletion {
    pub index: usize,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPhase {
    Idle,
    Animating,
}

/// Single pending-deletion slot.
#[derive(Debug, Default)]
pub struct RemovalState {
    pending: Option<PendingDeletion>,
}

impl RemovalState {
    pub fn phase(&self) -> RemovalPhase {
        if self.pending.is_some() {
            RemovalPhase::Animating
        } else {
            RemovalPhase::Idle
        }
    }

    pub fn pending(&self) -> Option<&PendingDeletion> {
        self.pending.as_ref()
    }

    /// Starts tracking `pending`, returning the deletion it overwrites.
    pub fn begin(&mut self, pending: PendingDeletion) -> Option<PendingDeletion> {
        self.pending.replace(pending)
    }

    /// Takes the pending deletion; later calls return `None`.
    pub fn complete(&mut self) -> Option<PendingDeletion> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Shift and per-element delays for one removal.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadePlan {
    /// Vertical translation applied to the container and every remaining item.
    pub shift: f32,
    /// Delay of the container's transition; the completion signal.
    pub container_delay: Duration,
    /// Remaining items in order with their stagger delay.
    pub item_delays: Vec<(NodeId, Duration)>,
}

/// Item `k` below the removed one waits `k * step`; the container waits
/// `remaining * step`, so it starts no earlier than the last item.
pub fn plan_cascade(remaining: &[Item], height: f32, step: Duration) -> CascadePlan {
    let item_delays = remaining
        .iter()
        .enumerate()
        .map(|(k, item)| (item.node, stagger(step, k)))
        .collect();

    CascadePlan {
        shift: -height,
        container_delay: stagger(step, remaining.len()),
        item_delays,
    }
}

/// `step * k`, saturating at `Duration::MAX`.
fn stagger(step: Duration, k: usize) -> Duration {
    u32::try_from(k)
        .ok()
        .and_then(|k| step.checked_mul(k))
        .unwrap_or(Duration::MAX)
}
