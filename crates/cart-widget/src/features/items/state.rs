use cart_core::ports::{NodeId, SlotNode};

/// Tags of template control nodes that are never real items.
pub const TEMPLATE_MARKER_TAGS: &[&str] = &["DOM-REPEAT"];

/// A displayed cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub node: NodeId,
    /// Position in the current sequence, top to bottom.
    pub index: usize,
}

/// Keeps the element nodes of a slot that are real items, in document order.
pub fn project(nodes: &[SlotNode]) -> Vec<Item> {
    nodes
        .iter()
        .filter(|node| {
            node.tag
                .as_deref()
                .is_some_and(|tag| !TEMPLATE_MARKER_TAGS.contains(&tag))
        })
        .enumerate()
        .map(|(index, node)| Item {
            node: node.id,
            index,
        })
        .collect()
}

/// The projected item sequence.
///
/// `None` until the first slot change, so the view can tell "not yet known"
/// from "empty".
#[derive(Debug, Default)]
pub struct ItemsState {
    items: Option<Vec<Item>>,
}

impl ItemsState {
    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = Some(items);
    }

    pub fn is_known(&self) -> bool {
        self.items.is_some()
    }

    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items().get(index)
    }

    /// Items strictly after `index`.
    pub fn after(&self, index: usize) -> &[Item] {
        self.items().get(index.saturating_add(1)..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: u64, tag: &str) -> SlotNode {
        SlotNode::element(NodeId(id), tag)
    }

    #[test]
    fn test_project_drops_text_and_template_markers() {
        let nodes = vec![
            SlotNode::text(NodeId(0)),
            element(1, "CART-ITEM"),
            SlotNode::text(NodeId(2)),
            element(3, "CART-ITEM"),
            element(4, "DOM-REPEAT"),
        ];

        let items = project(&nodes);

        assert_eq!(
            items,
            vec![
                Item {
                    node: NodeId(1),
                    index: 0
                },
                Item {
                    node: NodeId(3),
                    index: 1
                },
            ]
        );
    }

    #[test]
    fn test_project_empty_slot() {
        assert!(project(&[]).is_empty());
        assert!(project(&[element(0, "DOM-REPEAT")]).is_empty());
    }

    #[test]
    fn test_unknown_until_first_replace() {
        let mut state = ItemsState::default();
        assert!(!state.is_known());
        assert!(state.is_empty());

        state.replace(Vec::new());
        assert!(state.is_known());
        assert!(state.is_empty());
    }

    #[test]
    fn test_after_returns_strict_suffix() {
        let mut state = ItemsState::default();
        state.replace(project(&[
            element(1, "A"),
            element(2, "B"),
            element(3, "C"),
        ]));

        let after: Vec<_> = state.after(0).iter().map(|i| i.node).collect();
        assert_eq!(after, vec![NodeId(2), NodeId(3)]);
        assert!(state.after(2).is_empty());
        assert!(state.after(7).is_empty());
    }
}
