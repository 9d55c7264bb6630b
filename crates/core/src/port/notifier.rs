// Status Notifier Port
//
// Fan-out of queue snapshots to connected observers. Publishing is
// fire-and-forget and runs strictly after the engine's transaction
// commits; it must never block or be blocked by the critical section.

use crate::domain::QueueStatus;
use tokio::sync::broadcast;

/// Push a freshly computed snapshot to all connected observers.
pub trait StatusNotifier: Send + Sync {
    /// Best-effort delivery; per-observer ordering is preserved, but an
    /// observer that falls behind skips ahead rather than replaying.
    fn publish(&self, status: QueueStatus);
}

/// Capacity of the snapshot channel. A lagging observer loses the oldest
/// snapshots once this many are buffered, never their order.
const CHANNEL_CAPACITY: usize = 64;

/// Production notifier backed by a tokio broadcast channel.
///
/// Constructed once at startup and injected into the engine's caller
/// (publish side) and the transport (subscribe side). There is no global
/// handle; dropping every receiver just turns publishes into no-ops.
pub struct BroadcastNotifier {
    tx: broadcast::Sender<QueueStatus>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Register a new observer. The receiver only sees snapshots
    /// published after this call; there is no replay or backfill.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueStatus> {
        self.tx.subscribe()
    }

    /// Number of currently connected observers
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusNotifier for BroadcastNotifier {
    fn publish(&self, status: QueueStatus) {
        // send only fails when no observer is connected
        let _ = self.tx.send(status);
    }
}

/// No-op notifier for tests and headless tools
pub struct NullNotifier;

impl StatusNotifier for NullNotifier {
    fn publish(&self, _status: QueueStatus) {}
}
