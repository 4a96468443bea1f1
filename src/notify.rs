//! Outbound event delivery seam between the engine and transports.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use crate::protocol::Outbound;

/// Sink for engine events.
///
/// `deliver` is called while the acting room's lock is held; that is
/// what keeps per-room event order intact, so implementations must hand
/// the event off without blocking.
pub trait Notifier: Send + Sync + 'static {
    fn deliver(&self, outbound: Outbound);
}

/// Forwards events into an unbounded channel for a transport task to
/// drain and fan out to connections.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelNotifier {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn deliver(&self, outbound: Outbound) {
        // A closed receiver means the transport is gone; nothing left
        // to notify.
        if self.tx.send(outbound).is_err() {
            debug!("Dropping event for closed transport channel");
        }
    }
}

/// Collects events in memory, in delivery order. Used by tests and by
/// embedders that poll instead of streaming.
#[derive(Default)]
pub struct CollectingNotifier {
    events: Mutex<Vec<Outbound>>,
}

impl CollectingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Drain everything collected so far.
    pub fn take(&self) -> Vec<Outbound> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Copy of the collected events, leaving them in place.
    pub fn all(&self) -> Vec<Outbound> {
        self.events.lock().clone()
    }
}

impl Notifier for CollectingNotifier {
    fn deliver(&self, outbound: Outbound) {
        self.events.lock().push(outbound);
    }
}
