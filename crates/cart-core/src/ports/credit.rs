//! Remote credit service contract.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::SubscriptionError;

/// Address of a credit record in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreditKey {
    pub collection: String,
    pub document: String,
}

impl fmt::Display for CreditKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.document)
    }
}

/// Credit record document as pushed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRecord {
    /// Decimal amount, e.g. `"12.50"`.
    pub credit: String,
}

impl CreditRecord {
    pub fn new(credit: impl Into<String>) -> Self {
        Self {
            credit: credit.into(),
        }
    }
}

/// Receives pushes for one subscription.
pub trait CreditSink: Send + Sync {
    fn value(&self, record: CreditRecord);
    fn error(&self, error: SubscriptionError);
}

/// A push-based store of per-user credit records.
pub trait CreditService: Send + Sync {
    /// Opens a subscription. The service may push from any thread, before or
    /// after this call returns.
    fn subscribe(&self, key: &CreditKey, sink: Arc<dyn CreditSink>) -> Unsubscribe;
}

/// Teardown handle for a subscription.
///
/// Consumed on use, so a subscription can never be torn down twice.
/// Dropping an armed handle tears the subscription down as well.
pub struct Unsubscribe {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Unsubscribe {
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Tears down by cancelling `token`.
    pub fn from_token(token: CancellationToken) -> Self {
        Self::new(move || token.cancel())
    }

    /// A handle with nothing to tear down.
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    pub fn unsubscribe(mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("armed", &self.teardown.is_some())
            .finish()
    }
}
