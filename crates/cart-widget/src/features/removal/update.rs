//! Removal reducer.

use std::time::Duration;

use cart_core::config::AnimationConfig;
use cart_core::ports::{StyleProperty, StyleTarget, Transition};

use crate::effects::{CartEffect, CartNotification, StyleOp};
use crate::items::{Item, ItemsState};
use crate::removal::{DeleteRequest, PendingDeletion, RemovalState, plan_cascade};

fn transform_transition(animation: &AnimationConfig, delay: Duration) -> Transition {
    Transition {
        property: StyleProperty::Transform,
        duration: animation.duration(),
        easing: animation.easing.clone(),
        delay,
    }
}

fn style(
    target: StyleTarget,
    transition: Option<Transition>,
    translate_y: Option<f32>,
) -> [CartEffect; 2] {
    [
        CartEffect::Style(StyleOp::SetTransition { target, transition }),
        CartEffect::Style(StyleOp::SetTransform {
            target,
            translate_y,
        }),
    ]
}

/// Starts the cascade for the item at `request.index`.
///
/// `height` is the removed item's rendered height, sampled by the runtime.
/// A request while another removal is animating overwrites the pending
/// payload; the overwritten item will never emit `item-deleted`.
pub fn request_removal(
    removal: &mut RemovalState,
    items: &ItemsState,
    animation: &AnimationConfig,
    request: DeleteRequest,
    height: f32,
) -> Vec<CartEffect> {
    if items.get(request.index).is_none() {
        tracing::warn!(
            index = request.index,
            len = items.len(),
            "removal requested for unknown item"
        );
        return vec![];
    }

    let remaining = items.after(request.index);
    let plan = plan_cascade(remaining, height, animation.cascade_step());

    if let Some(overwritten) = removal.begin(PendingDeletion {
        index: request.index,
        metadata: request.metadata,
    }) {
        tracing::warn!(
            overwritten_index = overwritten.index,
            index = request.index,
            "removal requested while another was animating"
        );
    }
    tracing::debug!(
        index = request.index,
        remaining = remaining.len(),
        shift = plan.shift,
        "removal cascade started"
    );

    let mut effects = Vec::with_capacity(2 + plan.item_delays.len() * 2);
    for (node, delay) in plan.item_delays {
        effects.extend(style(
            StyleTarget::Item(node),
            Some(transform_transition(animation, delay)),
            Some(plan.shift),
        ));
    }
    effects.extend(style(
        StyleTarget::Container,
        Some(transform_transition(animation, plan.container_delay)),
        Some(plan.shift),
    ));
    effects
}

/// Accepts the container's transform transition as the end of the cascade.
///
/// Any other target or property, or a notification with nothing pending,
/// is a stale signal and is dropped.
pub fn handle_transition_end(
    removal: &mut RemovalState,
    target: StyleTarget,
    property: &StyleProperty,
) -> Vec<CartEffect> {
    if target != StyleTarget::Container || *property != StyleProperty::Transform {
        return vec![];
    }
    let Some(pending) = removal.complete() else {
        tracing::trace!("transition end with no pending removal");
        return vec![];
    };

    tracing::debug!(index = pending.index, "removal cascade completed");
    vec![CartEffect::Notify(CartNotification::ItemDeleted {
        metadata: pending.metadata,
    })]
}

/// Clears every transform and transition without animating, then re-pins the
/// cart's minimum height to its current geometry.
pub fn reset_animation(items: &[Item]) -> Vec<CartEffect> {
    let mut effects = Vec::with_capacity(3 + items.len() * 2);
    effects.extend(style(StyleTarget::Container, None, None));
    for item in items {
        effects.extend(style(StyleTarget::Item(item.node), None, None));
    }
    effects.push(CartEffect::PinContainerHeight);
    effects
}
