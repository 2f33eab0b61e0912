//! Error taxonomy for the cart coordinator.

use thiserror::Error;

/// Failure pushed by the credit service instead of a record value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// The credit record has never been written for this user.
    #[error("document does not exist")]
    NotFound,
    /// Any other failure reported by the remote service.
    #[error("{0}")]
    Other(String),
}

impl SubscriptionError {
    /// Message the remote store uses for a missing record.
    pub const NOT_FOUND_MESSAGE: &'static str = "document does not exist";

    /// Classifies a raw error message coming from the remote store.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        if message == Self::NOT_FOUND_MESSAGE {
            Self::NotFound
        } else {
            Self::Other(message)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Outcome of a gated user action that did not proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// A previous click is still inside the debounce window.
    #[error("click debounced")]
    Debounced,
    /// The click gate was cancelled before it acknowledged the click.
    #[error("click gate closed before acknowledgement")]
    GateClosed,
}

/// Caller-facing errors returned by the coordinator's host API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("no cart item at index {index} (cart holds {len} items)")]
    IndexOutOfRange { index: usize, len: usize },
}
