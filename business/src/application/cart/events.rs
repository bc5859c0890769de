use tokio::sync::broadcast;

use crate::domain::cart::events::CartEvent;

/// Publish/subscribe channel for [`CartEvent`]s of one cart session.
///
/// Publishing never blocks and never fails: events sent while nobody is
/// subscribed are dropped. A subscriber that falls more than `capacity`
/// events behind observes a lag and should re-read the current snapshot.
#[derive(Debug, Clone)]
pub struct CartEventBus {
    sender: broadcast::Sender<CartEvent>,
}

impl CartEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: CartEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for CartEventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
