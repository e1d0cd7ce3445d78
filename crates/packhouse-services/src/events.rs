//! Realtime change fan-out.

use packhouse_core::models::RealtimeEvent;
use tokio::sync::broadcast;

/// Broadcast channel for packer changes. Publishing never waits on
/// listeners; a listener that falls behind skips the missed events.
#[derive(Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<RealtimeEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns how many listeners received the event.
    pub fn publish(&self, event: RealtimeEvent) -> usize {
        let kind = event.kind.as_str();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!(event = kind, receivers, "Realtime event published");
                receivers
            }
            Err(_) => {
                tracing::debug!(event = kind, "No realtime listeners, event dropped");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
