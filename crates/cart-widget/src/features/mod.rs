//! Feature slices for the cart (state/update per slice).

pub mod actions;
pub mod credit;
pub mod items;
pub mod removal;
