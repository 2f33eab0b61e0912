//! Read-only snapshot of what the cart should display.

use crate::credit::ZERO_CREDIT;
use crate::state::CartState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub title: String,
    pub button_text: String,
    pub credit: String,
    pub subtotal: String,
    /// No credit, or credit that isn't positive.
    pub hide_credit: bool,
    pub show_subtotal: bool,
    pub checkout_disabled: bool,
    /// Items are known and there are none.
    pub show_empty_text: bool,
    pub item_count: usize,
}

impl CartView {
    pub fn from_state(state: &CartState) -> Self {
        let credit = state.credit.amount();
        let zero_subtotal = state.subtotal == ZERO_CREDIT;
        Self {
            title: state.config.title.clone(),
            button_text: state.config.button_text.clone(),
            credit: credit.to_string(),
            subtotal: state.subtotal.clone(),
            hide_credit: !credit.parse::<f64>().is_ok_and(|c| c > 0.0),
            show_subtotal: !zero_subtotal,
            checkout_disabled: zero_subtotal || state.disabled,
            show_empty_text: state.items.is_known() && state.items.is_empty(),
            item_count: state.items.len(),
        }
    }
}
