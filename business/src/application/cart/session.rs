use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};

use crate::domain::cart::events::CartEvent;
use crate::domain::cart::model::{CartLimits, CartSnapshot};
use crate::domain::cart::repository::SnapshotSink;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::DeviceId;

use super::events::CartEventBus;
use super::panel::PanelChannel;
use super::persistence::{DetachedSnapshotSink, SnapshotPersistence, SnapshotWriter};
use super::store::CartStore;

/// Everything the UI of one device works with: its cart and its panels,
/// sharing one event bus.
pub struct CartSession {
    pub store: CartStore,
    pub panels: PanelChannel,
    events: CartEventBus,
}

impl CartSession {
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub limits: CartLimits,
    pub event_capacity: usize,
    /// Sessions kept in memory before the least recently used idle ones are
    /// dropped. An evicted device is rehydrated on its next request.
    pub max_sessions: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            limits: CartLimits::unbounded(),
            event_capacity: 64,
            max_sessions: 10_000,
        }
    }
}

struct SessionEntry {
    session: Arc<Mutex<CartSession>>,
    last_used: u64,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<DeviceId, SessionEntry>,
    clock: u64,
}

impl Registry {
    fn touch(&mut self, device_id: &DeviceId) -> Option<Arc<Mutex<CartSession>>> {
        self.clock += 1;
        let clock = self.clock;
        self.entries.get_mut(device_id).map(|entry| {
            entry.last_used = clock;
            entry.session.clone()
        })
    }

    fn insert(&mut self, device_id: DeviceId, session: Arc<Mutex<CartSession>>) {
        self.clock += 1;
        self.entries.insert(
            device_id,
            SessionEntry {
                session,
                last_used: self.clock,
            },
        );
    }

    /// Drops least recently used sessions until at most `capacity` remain.
    /// Sessions somebody still holds are never dropped.
    fn evict_over(&mut self, capacity: usize) -> usize {
        let mut evicted = 0;
        while self.entries.len() > capacity {
            let idle = self
                .entries
                .iter()
                .filter(|(_, entry)| Arc::strong_count(&entry.session) == 1)
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(device_id, _)| device_id.clone());
            let Some(device_id) = idle else {
                break;
            };
            self.entries.remove(&device_id);
            evicted += 1;
        }
        evicted
    }
}

/// Owns the cart sessions of the devices seen by this process.
///
/// A session is rehydrated from the durable store the first time its device
/// shows up, or again after it was evicted. Access to a session goes through
/// its mutex, so the actions of one device are applied one after the other.
pub struct CartSessions {
    registry: Mutex<Registry>,
    persistence: Arc<SnapshotPersistence>,
    writer: SnapshotWriter,
    settings: SessionSettings,
    logger: Arc<dyn Logger>,
}

impl CartSessions {
    /// Starts the snapshot writer; must be called inside a tokio runtime.
    pub fn start(persistence: Arc<SnapshotPersistence>, settings: SessionSettings) -> Self {
        let logger = persistence.logger.clone();
        let writer = SnapshotWriter::spawn(persistence.clone());
        Self {
            registry: Mutex::new(Registry::default()),
            persistence,
            writer,
            settings,
            logger,
        }
    }

    pub async fn session(&self, device_id: &DeviceId) -> Arc<Mutex<CartSession>> {
        if let Some(session) = self.registry.lock().await.touch(device_id) {
            return session;
        }

        // Writes queued by an evicted session must land before the re-read.
        self.writer.flush().await;
        let snapshot = match self.persistence.rehydrate(device_id).await {
            Ok(snapshot) => snapshot,
            Err(_) => {
                // Not registered: the next request retries the read.
                let sink = Arc::new(DetachedSnapshotSink::new(
                    device_id.clone(),
                    self.logger.clone(),
                ));
                return Arc::new(Mutex::new(self.open(CartSnapshot::empty(), sink)));
            }
        };
        let session = Arc::new(Mutex::new(
            self.open(snapshot, self.writer.sink(device_id.clone())),
        ));

        let evicted = {
            let mut registry = self.registry.lock().await;
            if let Some(existing) = registry.touch(device_id) {
                return existing;
            }
            registry.insert(device_id.clone(), session.clone());
            registry.evict_over(self.settings.max_sessions)
        };

        self.logger
            .info(&format!("Cart session opened for device {}", device_id));
        if evicted > 0 {
            self.logger
                .debug(&format!("Evicted {} idle cart sessions", evicted));
        }
        session
    }

    fn open(&self, snapshot: CartSnapshot, sink: Arc<dyn SnapshotSink>) -> CartSession {
        let events = CartEventBus::new(self.settings.event_capacity);
        let store = CartStore::new(snapshot, self.settings.limits, sink, events.clone());
        CartSession {
            store,
            panels: PanelChannel::new(events.clone()),
            events,
        }
    }

    pub async fn active_sessions(&self) -> usize {
        self.registry.lock().await.entries.len()
    }

    /// Waits for every snapshot submitted so far to reach the store.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Drops all sessions and stops the writer once pending writes are done.
    pub async fn shutdown(&self) {
        let closed = {
            let mut registry = self.registry.lock().await;
            let count = registry.entries.len();
            registry.entries.clear();
            count
        };
        self.writer.shutdown().await;
        self.logger
            .info(&format!("Cart sessions shut down ({} closed)", closed));
    }
}
