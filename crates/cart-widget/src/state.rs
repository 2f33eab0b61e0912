//! Coordinator state composition.
//!
//! ```text
//! CartState
//! ├── config: CartConfig
//! ├── items: ItemsState       (projected item sequence)
//! ├── removal: RemovalState   (single pending deletion)
//! ├── credit: CreditState     (credit amount + live subscription)
//! ├── actions: ActionsState   (debouncer + in-flight click gates)
//! ├── ids: IdSeq
//! ├── subtotal / disabled     (host-supplied properties)
//! ```
//!
//! One `CartState` per widget instance; nothing is shared between instances.

use cart_core::CartConfig;

use crate::actions::ActionsState;
use crate::common::IdSeq;
use crate::credit::{CreditState, ZERO_CREDIT};
use crate::items::ItemsState;
use crate::removal::RemovalState;

#[derive(Debug)]
pub struct CartState {
    pub config: CartConfig,
    pub items: ItemsState,
    pub removal: RemovalState,
    pub credit: CreditState,
    pub actions: ActionsState,
    pub ids: IdSeq,
    /// Formatted subtotal supplied by the host.
    pub subtotal: String,
    /// Host-level checkout disable flag.
    pub disabled: bool,
}

impl CartState {
    pub fn new(config: CartConfig) -> Self {
        let actions = ActionsState::new(config.actions.debounce_window());
        Self {
            config,
            items: ItemsState::default(),
            removal: RemovalState::default(),
            credit: CreditState::default(),
            actions,
            ids: IdSeq::default(),
            subtotal: ZERO_CREDIT.to_string(),
            disabled: false,
        }
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(CartConfig::default())
    }
}
