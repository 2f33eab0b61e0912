//! Credit balance: one push subscription per signed-in user.

mod state;
mod update;

pub use state::{ActiveSubscription, CreditState, UserIdentity, ZERO_CREDIT};
pub use update::{handle_error, handle_identity_changed, handle_opened, handle_value, reset};
