mod ids;

pub use ids::{GateId, IdSeq, SubscriptionId};
