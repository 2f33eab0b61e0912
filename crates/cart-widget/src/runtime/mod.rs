//! Cart runtime: owns the collaborators, feeds the reducer, executes effects.
//!
//! Style writes, credit subscriptions, overlay calls and host notifications
//! all leave the widget here; `update` only describes them as `CartEffect`s.
//!
//! ## Inbox Pattern
//!
//! - Async work (credit pushes, click gates) sends `CartEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` and dispatches each event in arrival order
//! - Host callbacks arrive as [`HostCommand`]s and are translated into events
//!
//! Everything runs on one logical thread: one event is reduced and its
//! effects executed before the next event is looked at.
//!
//! Structure:
//! - `mod.rs`: Core runtime (`CartRuntime`, event loop, effect dispatch)
//! - `command.rs`: Host command type
//! - `inbox.rs`: Channel types
//! - `handlers.rs`: Effect handlers (click gate, credit sink)

mod command;
mod handlers;
mod inbox;

use std::future::Future;
use std::sync::Arc;

use cart_core::ports::{
    CreditService, Overlay, RenderSurface, ReportSink, StyleProperty, StyleTarget,
};
use cart_core::{CartConfig, CartError};
pub use command::HostCommand;
pub use inbox::{
    CartEventReceiver, CartEventSender, HostCommandReceiver, HostCommandSender,
    NotificationReceiver,
};
use inbox::NotificationSender;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::actions::GatedAction;
use crate::common::GateId;
use crate::credit::UserIdentity;
use crate::effects::{CartEffect, StyleOp};
use crate::events::{ActionEvent, CartEvent, CreditEvent, RemovalEvent};
use crate::removal::DeleteRequest;
use crate::state::CartState;
use crate::update;
use crate::view::CartView;

/// The collaborators a runtime drives.
pub struct Collaborators<S> {
    pub surface: S,
    pub credit: Arc<dyn CreditService>,
    pub overlay: Box<dyn Overlay>,
    pub reporter: Arc<dyn ReportSink>,
}

/// Cart runtime.
///
/// Owns the state and the collaborators. Methods named after host callbacks
/// (`slot_changed`, `delete_item`, ...) are thin wrappers over
/// [`CartRuntime::handle_command`].
pub struct CartRuntime<S> {
    pub state: CartState,
    surface: S,
    credit: Arc<dyn CreditService>,
    overlay: Box<dyn Overlay>,
    reporter: Arc<dyn ReportSink>,
    /// Inbox sender - handlers and credit sinks send events here.
    inbox_tx: CartEventSender,
    /// Inbox receiver - drained by the runtime.
    inbox_rx: CartEventReceiver,
    notify_tx: NotificationSender,
}

impl<S: RenderSurface> CartRuntime<S> {
    /// Creates a runtime and the receiver for its outbound notifications.
    pub fn new(
        config: CartConfig,
        collaborators: Collaborators<S>,
    ) -> (Self, NotificationReceiver) {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        let runtime = Self {
            state: CartState::new(config),
            surface: collaborators.surface,
            credit: collaborators.credit,
            overlay: collaborators.overlay,
            reporter: collaborators.reporter,
            inbox_tx,
            inbox_rx,
            notify_tx,
        };
        (runtime, notify_rx)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// A sender into this runtime's inbox.
    pub fn inbox(&self) -> CartEventSender {
        self.inbox_tx.clone()
    }

    pub fn view(&self) -> CartView {
        CartView::from_state(&self.state)
    }

    // ========================================================================
    // Event Loop
    // ========================================================================

    /// Processes host commands and inbox events until `shutdown` fires or the
    /// command channel closes, then closes the credit subscription.
    pub async fn run(&mut self, mut commands: HostCommandReceiver, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                Some(event) = self.inbox_rx.recv() => self.dispatch(event),
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if let Err(err) = self.handle_command(command) {
                        tracing::warn!(error = %err, "host command rejected");
                    }
                }
            }
        }
        self.dispatch(CartEvent::IdentityChanged(None));
    }

    /// Dispatches every event currently queued in the inbox.
    pub fn drain_inbox(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
            count += 1;
        }
        count
    }

    /// Runs one event through the reducer and executes its effects.
    pub fn dispatch(&mut self, event: CartEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    // ========================================================================
    // Host Commands
    // ========================================================================

    /// Translates a host callback into an event and dispatches it.
    ///
    /// # Errors
    /// Returns [`CartError::IndexOutOfRange`] for a removal that names no
    /// projected item; state is left untouched.
    pub fn handle_command(&mut self, command: HostCommand) -> Result<(), CartError> {
        let event = match command {
            HostCommand::SlotChanged => CartEvent::SlotChanged {
                nodes: self.surface.slot_nodes(),
            },
            HostCommand::DeleteItem(request) => {
                let item = self.state.items.get(request.index).copied().ok_or(
                    CartError::IndexOutOfRange {
                        index: request.index,
                        len: self.state.items.len(),
                    },
                )?;
                let height = self.surface.element_height(item.node);
                CartEvent::Removal(RemovalEvent::Requested { request, height })
            }
            HostCommand::TransitionEnded { target, property } => {
                CartEvent::Removal(RemovalEvent::TransitionEnd { target, property })
            }
            HostCommand::SetUser(identity) => CartEvent::IdentityChanged(identity),
            HostCommand::SetSubtotal(subtotal) => CartEvent::SubtotalChanged(subtotal),
            HostCommand::SetDisabled(disabled) => CartEvent::DisabledChanged(disabled),
            HostCommand::CheckoutClicked => clicked(GatedAction::Checkout),
            HostCommand::ContinueShoppingClicked => clicked(GatedAction::ContinueShopping),
            HostCommand::Open => CartEvent::OpenRequested,
            HostCommand::Reset => CartEvent::ResetRequested,
            HostCommand::OverlayReset => CartEvent::OverlayReset,
        };
        self.dispatch(event);
        Ok(())
    }

    pub fn slot_changed(&mut self) {
        self.infallible(HostCommand::SlotChanged);
    }

    /// Starts the removal cascade for `request.index`.
    ///
    /// # Errors
    /// See [`CartRuntime::handle_command`].
    pub fn delete_item(&mut self, request: DeleteRequest) -> Result<(), CartError> {
        self.handle_command(HostCommand::DeleteItem(request))
    }

    /// Reports a finished transition, by CSS property name.
    pub fn transition_ended(&mut self, target: StyleTarget, property: &str) {
        self.infallible(HostCommand::TransitionEnded {
            target,
            property: StyleProperty::from_css_name(property),
        });
    }

    pub fn set_user(&mut self, identity: Option<UserIdentity>) {
        self.infallible(HostCommand::SetUser(identity));
    }

    pub fn set_subtotal(&mut self, subtotal: impl Into<String>) {
        self.infallible(HostCommand::SetSubtotal(subtotal.into()));
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.infallible(HostCommand::SetDisabled(disabled));
    }

    pub fn checkout_clicked(&mut self) {
        self.infallible(HostCommand::CheckoutClicked);
    }

    pub fn continue_shopping_clicked(&mut self) {
        self.infallible(HostCommand::ContinueShoppingClicked);
    }

    pub fn open(&mut self) {
        self.infallible(HostCommand::Open);
    }

    /// Closes the credit subscription, drops any pending removal and resets
    /// the overlay.
    pub fn reset(&mut self) {
        self.infallible(HostCommand::Reset);
    }

    /// The overlay reset itself; tear down without resetting it again.
    pub fn overlay_reset(&mut self) {
        self.infallible(HostCommand::OverlayReset);
    }

    fn infallible(&mut self, command: HostCommand) {
        if let Err(err) = self.handle_command(command) {
            tracing::warn!(error = %err, "host command rejected");
        }
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    /// Executes effects returned by the reducer, in order.
    fn execute_effects(&mut self, effects: Vec<CartEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: CartEffect) {
        match effect {
            CartEffect::Style(StyleOp::SetTransition { target, transition }) => {
                self.surface.set_transition(target, transition.as_ref());
            }
            CartEffect::Style(StyleOp::SetTransform {
                target,
                translate_y,
            }) => {
                self.surface.set_transform(target, translate_y);
            }
            CartEffect::PinContainerHeight => {
                let height = self.surface.host_height();
                self.surface.set_min_height(height);
            }
            CartEffect::Subscribe { id, key } => {
                let sink = Arc::new(handlers::InboxCreditSink::new(id, self.inbox_tx.clone()));
                let handle = self.credit.subscribe(&key, sink);
                self.dispatch(CartEvent::Credit(CreditEvent::Opened { id, handle }));
            }
            CartEffect::Unsubscribe { handle } => handle.unsubscribe(),
            CartEffect::Report { source, error } => self.reporter.report(source, &error),
            CartEffect::StartClickGate { id, action } => self.start_click_gate(id, action),
            CartEffect::CancelGate { token } => {
                if let Some(token) = token {
                    token.cancel();
                }
            }
            CartEffect::Notify(notification) => {
                tracing::debug!(event = notification.name(), "cart notification");
                if self.notify_tx.send(notification).is_err() {
                    tracing::debug!("cart notification dropped: no listener");
                }
            }
            CartEffect::OpenOverlay => self.overlay.open(),
            CartEffect::CloseOverlay => self.overlay.close(),
            CartEffect::ResetOverlay => self.overlay.reset(),
        }
    }

    fn start_click_gate(&mut self, id: GateId, action: GatedAction) {
        let cancel = CancellationToken::new();
        let delay = self.state.config.actions.click_gate();
        tracing::trace!(?action, ?delay, "click gate started");
        self.spawn_effect(handlers::click_gate(id, delay, cancel.clone()));
        self.dispatch(CartEvent::Action(ActionEvent::GateStarted {
            id,
            cancel: Some(cancel),
        }));
    }

    /// Spawns an async handler and sends its result event to the inbox.
    fn spawn_effect<Fut>(&self, fut: Fut)
    where
        Fut: Future<Output = CartEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let event = fut.await;
            let _ = tx.send(event);
        });
    }
}

fn clicked(action: GatedAction) -> CartEvent {
    CartEvent::Action(ActionEvent::Clicked {
        action,
        at: Instant::now(),
    })
}
