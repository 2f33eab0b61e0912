//! Headless, in-process implementations of every port.
//!
//! They let the coordinator run without a browser or a remote store, and they
//! record enough to make assertions against in tests.

use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::SubscriptionError;
use crate::ports::{
    CreditKey, CreditRecord, CreditService, CreditSink, NodeId, Overlay, RenderSurface, ReportSink,
    SlotNode, StyleTarget, Transition, Unsubscribe,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Rendering surface
// ============================================================================

/// Inline style applied to one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStyle {
    pub transition: Option<Transition>,
    pub translate_y: Option<f32>,
}

/// A rendering surface backed by plain data.
#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: Vec<SlotNode>,
    heights: HashMap<NodeId, f32>,
    styles: HashMap<StyleTarget, ElementStyle>,
    chrome_height: f32,
    min_height: Option<f32>,
    next_id: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height of everything except the items (header, pricing, buttons).
    pub fn with_chrome_height(mut self, px: f32) -> Self {
        self.chrome_height = px;
        self
    }

    /// Appends an element node of the given height.
    pub fn push_element(&mut self, tag: &str, height: f32) -> NodeId {
        let id = self.alloc();
        self.nodes.push(SlotNode::element(id, tag));
        self.heights.insert(id, height);
        id
    }

    /// Appends a whitespace text node.
    pub fn push_text(&mut self) -> NodeId {
        let id = self.alloc();
        self.nodes.push(SlotNode::text(id));
        id
    }

    pub fn remove(&mut self, node: NodeId) {
        self.nodes.retain(|n| n.id != node);
        self.heights.remove(&node);
        self.styles.remove(&StyleTarget::Item(node));
    }

    pub fn style(&self, target: StyleTarget) -> ElementStyle {
        self.styles.get(&target).cloned().unwrap_or_default()
    }

    pub fn min_height(&self) -> Option<f32> {
        self.min_height
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

impl RenderSurface for MemorySurface {
    fn slot_nodes(&self) -> Vec<SlotNode> {
        self.nodes.clone()
    }

    fn element_height(&self, node: NodeId) -> f32 {
        self.heights.get(&node).copied().unwrap_or_default()
    }

    fn host_height(&self) -> f32 {
        self.chrome_height
            + self
                .nodes
                .iter()
                .filter_map(|n| self.heights.get(&n.id))
                .sum::<f32>()
    }

    fn set_transition(&mut self, target: StyleTarget, transition: Option<&Transition>) {
        self.styles.entry(target).or_default().transition = transition.cloned();
    }

    fn set_transform(&mut self, target: StyleTarget, translate_y: Option<f32>) {
        self.styles.entry(target).or_default().translate_y = translate_y;
    }

    fn set_min_height(&mut self, px: f32) {
        self.min_height = Some(px);
    }
}

// ============================================================================
// Credit service
// ============================================================================

struct Subscriber {
    key: CreditKey,
    sink: Arc<dyn CreditSink>,
}

#[derive(Default)]
struct CreditStore {
    records: HashMap<CreditKey, CreditRecord>,
    subscribers: HashMap<u64, Subscriber>,
    next_id: u64,
}

impl CreditStore {
    fn sinks_for(&self, key: &CreditKey) -> Vec<Arc<dyn CreditSink>> {
        self.subscribers
            .values()
            .filter(|s| &s.key == key)
            .map(|s| Arc::clone(&s.sink))
            .collect()
    }
}

/// Credit store that fans pushes out to live subscribers.
///
/// Like a document store listener, a new subscription immediately receives
/// the current record, or [`SubscriptionError::NotFound`] if there is none.
/// Clones share the same store.
#[derive(Clone, Default)]
pub struct MemoryCreditService {
    inner: Arc<Mutex<CreditStore>>,
}

impl MemoryCreditService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a record and pushes it to every subscriber of `key`.
    pub fn set_credit(&self, key: &CreditKey, credit: impl Into<String>) {
        let record = CreditRecord::new(credit);
        let sinks = {
            let mut store = lock(&self.inner);
            store.records.insert(key.clone(), record.clone());
            store.sinks_for(key)
        };
        for sink in sinks {
            sink.value(record.clone());
        }
    }

    /// Writes a raw document. Documents that don't decode push an error.
    pub fn set_document(&self, key: &CreditKey, document: serde_json::Value) {
        match serde_json::from_value::<CreditRecord>(document) {
            Ok(record) => self.set_credit(key, record.credit),
            Err(err) => self.fail(
                key,
                SubscriptionError::Other(format!("malformed credit record: {err}")),
            ),
        }
    }

    /// Deletes a record; subscribers see [`SubscriptionError::NotFound`].
    pub fn delete(&self, key: &CreditKey) {
        let sinks = {
            let mut store = lock(&self.inner);
            store.records.remove(key);
            store.sinks_for(key)
        };
        for sink in sinks {
            sink.error(SubscriptionError::NotFound);
        }
    }

    /// Pushes an error to every subscriber of `key`.
    pub fn fail(&self, key: &CreditKey, error: SubscriptionError) {
        let sinks = lock(&self.inner).sinks_for(key);
        for sink in sinks {
            sink.error(error.clone());
        }
    }

    pub fn live_subscriptions(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }

    pub fn live_keys(&self) -> Vec<CreditKey> {
        lock(&self.inner)
            .subscribers
            .values()
            .map(|s| s.key.clone())
            .collect()
    }
}

impl CreditService for MemoryCreditService {
    fn subscribe(&self, key: &CreditKey, sink: Arc<dyn CreditSink>) -> Unsubscribe {
        let (id, current) = {
            let mut store = lock(&self.inner);
            let id = store.next_id;
            store.next_id = store.next_id.wrapping_add(1);
            store.subscribers.insert(
                id,
                Subscriber {
                    key: key.clone(),
                    sink: Arc::clone(&sink),
                },
            );
            (id, store.records.get(key).cloned())
        };

        match current {
            Some(record) => sink.value(record),
            None => sink.error(SubscriptionError::NotFound),
        }

        let inner = Arc::clone(&self.inner);
        Unsubscribe::new(move || {
            lock(&inner).subscribers.remove(&id);
        })
    }
}

// ============================================================================
// Overlay
// ============================================================================

/// Counts of overlay calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayLog {
    pub opened: usize,
    pub closed: usize,
    pub resets: usize,
    pub is_open: bool,
}

/// Overlay that only records calls. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MemoryOverlay {
    log: Arc<Mutex<OverlayLog>>,
}

impl MemoryOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> OverlayLog {
        *lock(&self.log)
    }
}

impl Overlay for MemoryOverlay {
    fn open(&mut self) {
        let mut log = lock(&self.log);
        log.opened += 1;
        log.is_open = true;
    }

    fn close(&mut self) {
        let mut log = lock(&self.log);
        log.closed += 1;
        log.is_open = false;
    }

    fn reset(&mut self) {
        let mut log = lock(&self.log);
        log.resets += 1;
        log.is_open = false;
    }
}

// ============================================================================
// Report sink
// ============================================================================

/// Collects reported errors as `source: message` lines. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    reports: Arc<Mutex<Vec<String>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<String> {
        lock(&self.reports).clone()
    }
}

impl ReportSink for MemoryReporter {
    fn report(&self, source: &str, error: &(dyn Error + 'static)) {
        lock(&self.reports).push(format!("{source}: {error}"));
    }
}
