//! Item projection: slot nodes to the ordered list of displayed items.

mod state;
mod update;

pub use state::{Item, ItemsState, TEMPLATE_MARKER_TAGS, project};
pub use update::handle_slot_changed;
