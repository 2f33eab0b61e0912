use cart_core::ports::Unsubscribe;
use serde::{Deserialize, Serialize};

use crate::common::SubscriptionId;

/// Credit shown when there is no subscription or it failed.
pub const ZERO_CREDIT: &str = "0.00";

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
}

impl UserIdentity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// The live subscription slot.
///
/// `handle` is `None` between issuing the subscribe effect and the service
/// handing back its teardown.
#[derive(Debug)]
pub struct ActiveSubscription {
    pub id: SubscriptionId,
    pub uid: String,
    pub handle: Option<Unsubscribe>,
}

#[derive(Debug)]
pub struct CreditState {
    amount: String,
    subscription: Option<ActiveSubscription>,
}

impl Default for CreditState {
    fn default() -> Self {
        Self {
            amount: ZERO_CREDIT.to_string(),
            subscription: None,
        }
    }
}

impl CreditState {
    /// Current credit as a decimal string.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn subscription(&self) -> Option<&ActiveSubscription> {
        self.subscription.as_ref()
    }

    /// True if `id` is the subscription currently owned by this state.
    pub fn is_current(&self, id: SubscriptionId) -> bool {
        self.subscription.as_ref().is_some_and(|s| s.id == id)
    }

    pub(crate) fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub(crate) fn zero(&mut self) {
        self.amount = ZERO_CREDIT.to_string();
    }

    pub(crate) fn install(&mut self, subscription: ActiveSubscription) {
        self.subscription = Some(subscription);
    }

    pub(crate) fn take_subscription(&mut self) -> Option<ActiveSubscription> {
        self.subscription.take()
    }

    pub(crate) fn subscription_mut(&mut self) -> Option<&mut ActiveSubscription> {
        self.subscription.as_mut()
    }
}
