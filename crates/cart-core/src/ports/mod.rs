//! Contracts for the collaborators the coordinator drives.

mod credit;
mod overlay;
mod report;
mod surface;

pub use credit::{CreditKey, CreditRecord, CreditService, CreditSink, Unsubscribe};
pub use overlay::Overlay;
pub use report::{ReportSink, TracingReporter};
pub use surface::{NodeId, RenderSurface, SlotNode, StyleProperty, StyleTarget, Transition};
