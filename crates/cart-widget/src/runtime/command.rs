use cart_core::ports::{StyleProperty, StyleTarget};

use crate::credit::UserIdentity;
use crate::removal::DeleteRequest;

/// A callback from the host page, before the runtime turns it into a
/// [`CartEvent`](crate::events::CartEvent).
///
/// Commands that need geometry or wall-clock time are enriched by the
/// runtime; the rest map one-to-one onto events.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// The item slot's assigned nodes changed.
    SlotChanged,
    DeleteItem(DeleteRequest),
    TransitionEnded {
        target: StyleTarget,
        property: StyleProperty,
    },
    SetUser(Option<UserIdentity>),
    SetSubtotal(String),
    SetDisabled(bool),
    CheckoutClicked,
    ContinueShoppingClicked,
    Open,
    Reset,
    OverlayReset,
}
