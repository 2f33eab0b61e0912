use tokio::sync::mpsc;

use crate::effects::CartNotification;
use crate::events::CartEvent;
use crate::runtime::HostCommand;

/// Sender for the runtime's event inbox.
pub type CartEventSender = mpsc::UnboundedSender<CartEvent>;

/// Receiver for the runtime's event inbox.
pub type CartEventReceiver = mpsc::UnboundedReceiver<CartEvent>;

/// Outbound notifications (`item-deleted`, `checkout-requested`).
pub type NotificationReceiver = mpsc::UnboundedReceiver<CartNotification>;
pub(crate) type NotificationSender = mpsc::UnboundedSender<CartNotification>;

/// Host callbacks fed to [`CartRuntime::run`](crate::runtime::CartRuntime::run).
pub type HostCommandSender = mpsc::UnboundedSender<HostCommand>;
pub type HostCommandReceiver = mpsc::UnboundedReceiver<HostCommand>;
