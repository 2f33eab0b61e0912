//! Items reducer.

use cart_core::ports::SlotNode;

use crate::effects::CartEffect;
use crate::items::{ItemsState, project};
use crate::removal;

/// Recomputes the item sequence from scratch and resets the cascade styling
/// so the next removal starts from a clean, height-pinned baseline.
pub fn handle_slot_changed(items: &mut ItemsState, nodes: &[SlotNode]) -> Vec<CartEffect> {
    items.replace(project(nodes));
    tracing::debug!(count = items.len(), "cart items projected");
    removal::reset_animation(items.items())
}

#[cfg(test)]
mod tests {
    use cart_core::ports::{NodeId, StyleTarget};

    use super::*;
    use crate::effects::StyleOp;

    #[test]
    fn test_slot_change_resets_every_item_and_pins_height() {
        let mut items = ItemsState::default();
        let nodes = vec![
            SlotNode::element(NodeId(1), "CART-ITEM"),
            SlotNode::text(NodeId(2)),
            SlotNode::element(NodeId(3), "CART-ITEM"),
        ];

        let effects = handle_slot_changed(&mut items, &nodes);

        assert_eq!(items.len(), 2);
        let reset_targets: Vec<StyleTarget> = effects
            .iter()
            .filter_map(|e| match e {
                CartEffect::Style(StyleOp::SetTransform { target, .. }) => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(
            reset_targets,
            vec![
                StyleTarget::Container,
                StyleTarget::Item(NodeId(1)),
                StyleTarget::Item(NodeId(3)),
            ]
        );
        assert!(matches!(effects.last(), Some(CartEffect::PinContainerHeight)));
    }
}
