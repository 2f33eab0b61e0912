//! Rendering surface contract.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Stable handle to an element on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// A node assigned to the item slot, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotNode {
    pub id: NodeId,
    /// Upper-case element tag; `None` for text and comment nodes.
    pub tag: Option<String>,
}

impl SlotNode {
    pub fn element(id: NodeId, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: Some(tag.into()),
        }
    }

    pub fn text(id: NodeId) -> Self {
        Self { id, tag: None }
    }
}

/// Element whose inline style is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    /// The block below the item list that closes the removal gap.
    Container,
    Item(NodeId),
}

/// CSS property named by a transition-completion notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Transform,
    Other(String),
}

impl StyleProperty {
    pub fn from_css_name(name: &str) -> Self {
        if name == "transform" {
            Self::Transform
        } else {
            Self::Other(name.to_string())
        }
    }

    pub fn css_name(&self) -> &str {
        match self {
            Self::Transform => "transform",
            Self::Other(name) => name,
        }
    }
}

/// One CSS transition on a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub property: StyleProperty,
    pub duration: Duration,
    pub easing: String,
    pub delay: Duration,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}s {}",
            self.property.css_name(),
            self.duration.as_secs_f64(),
            self.easing
        )?;
        if !self.delay.is_zero() {
            write!(f, " {}s", self.delay.as_secs_f64())?;
        }
        Ok(())
    }
}

/// The host that renders the cart.
///
/// Style setters take `None` to clear the property (`none`).
pub trait RenderSurface {
    /// Nodes currently assigned to the item slot, in document order.
    fn slot_nodes(&self) -> Vec<SlotNode>;

    /// Rendered bounding height of an element, in device-independent pixels.
    fn element_height(&self, node: NodeId) -> f32;

    /// Rendered height of the whole cart.
    fn host_height(&self) -> f32;

    fn set_transition(&mut self, target: StyleTarget, transition: Option<&Transition>);

    /// Sets a vertical translation in pixels.
    fn set_transform(&mut self, target: StyleTarget, translate_y: Option<f32>);

    fn set_min_height(&mut self, px: f32);
}
