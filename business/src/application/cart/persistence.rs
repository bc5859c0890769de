use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::domain::cart::errors::PersistenceError;
use crate::domain::cart::model::CartSnapshot;
use crate::domain::cart::persisted;
use crate::domain::cart::repository::{SnapshotSink, SnapshotStore};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::DeviceId;

/// Reads and writes versioned snapshots through a [`SnapshotStore`].
///
/// Neither operation fails from the caller's point of view: a failed write
/// is logged and the in-memory cart stays authoritative, a missing or
/// unreadable record rehydrates as an empty cart.
pub struct SnapshotPersistence {
    pub store: Arc<dyn SnapshotStore>,
    pub logger: Arc<dyn Logger>,
}

impl SnapshotPersistence {
    pub async fn save(&self, device_id: &DeviceId, snapshot: &CartSnapshot) {
        if let Err(err) = self.try_save(device_id, snapshot).await {
            self.logger.warn(&format!(
                "Cart snapshot for device {} not persisted: {}",
                device_id, err
            ));
        }
    }

    pub async fn try_save(
        &self,
        device_id: &DeviceId,
        snapshot: &CartSnapshot,
    ) -> Result<(), PersistenceError> {
        let payload = persisted::encode(snapshot)?;
        self.store
            .write(device_id, &payload)
            .await
            .map_err(PersistenceError::WriteFailed)?;

        self.logger.debug(&format!(
            "Cart snapshot persisted for device {} ({} line items)",
            device_id,
            snapshot.line_item_count()
        ));
        Ok(())
    }

    /// Same as [`SnapshotPersistence::rehydrate`], with an unreadable store
    /// also degrading to an empty cart.
    pub async fn load(&self, device_id: &DeviceId) -> CartSnapshot {
        self.rehydrate(device_id)
            .await
            .unwrap_or_else(|_| CartSnapshot::empty())
    }

    /// Reads the stored snapshot of a device. A missing record is an empty
    /// cart and a corrupt one is discarded. Only a failed read is an error,
    /// in which case the stored record is left alone.
    pub async fn rehydrate(&self, device_id: &DeviceId) -> Result<CartSnapshot, RepositoryError> {
        let payload = match self.store.read(device_id).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                self.logger
                    .debug(&format!("No stored cart for device {}", device_id));
                return Ok(CartSnapshot::empty());
            }
            Err(err) => {
                self.logger.warn(&format!(
                    "Cart store unreadable for device {}: {}",
                    device_id, err
                ));
                return Err(err);
            }
        };

        match persisted::decode(&payload) {
            Ok(snapshot) => {
                self.logger.info(&format!(
                    "Cart rehydrated for device {} ({} line items)",
                    device_id,
                    snapshot.line_item_count()
                ));
                Ok(snapshot)
            }
            Err(err) => {
                self.logger.warn(&format!(
                    "Discarding stored cart for device {}: {}",
                    device_id, err
                ));
                if let Err(err) = self.store.delete(device_id).await {
                    self.logger.warn(&format!(
                        "Could not discard stored cart for device {}: {}",
                        device_id, err
                    ));
                }
                Ok(CartSnapshot::empty())
            }
        }
    }
}

enum WriteCommand {
    Save {
        device_id: DeviceId,
        snapshot: CartSnapshot,
    },
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Background task applying snapshot writes one at a time, in submission
/// order. A later write for a device therefore always reflects later state.
pub struct SnapshotWriter {
    sender: mpsc::UnboundedSender<WriteCommand>,
    handle: Mutex<Option<JoinHandle<()>>>,
    logger: Arc<dyn Logger>,
}

impl SnapshotWriter {
    /// Spawns the writer on the current tokio runtime.
    pub fn spawn(persistence: Arc<SnapshotPersistence>) -> Self {
        let logger = persistence.logger.clone();
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            while let Some(command) = receiver.recv().await {
                match command {
                    WriteCommand::Save {
                        device_id,
                        snapshot,
                    } => persistence.save(&device_id, &snapshot).await,
                    WriteCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                    WriteCommand::Shutdown => break,
                }
            }
            persistence.logger.info("Cart snapshot writer stopped");
        });

        Self {
            sender,
            handle: Mutex::new(Some(handle)),
            logger,
        }
    }

    /// Sink feeding this writer with the snapshots of one device.
    pub fn sink(&self, device_id: DeviceId) -> Arc<dyn SnapshotSink> {
        Arc::new(QueuedSnapshotSink {
            device_id,
            sender: self.sender.clone(),
            logger: self.logger.clone(),
        })
    }

    /// Waits until every write queued before this call has been applied.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(WriteCommand::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// Applies the pending writes, then stops the task. Later submissions are
    /// dropped with a warning.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(WriteCommand::Shutdown);
        let handle = match self.handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(handle) = handle else {
            return;
        };
        if let Err(err) = handle.await {
            self.logger
                .error(&format!("Cart snapshot writer crashed: {}", err));
        }
    }
}

struct QueuedSnapshotSink {
    device_id: DeviceId,
    sender: mpsc::UnboundedSender<WriteCommand>,
    logger: Arc<dyn Logger>,
}

impl SnapshotSink for QueuedSnapshotSink {
    fn submit(&self, snapshot: &CartSnapshot) {
        let command = WriteCommand::Save {
            device_id: self.device_id.clone(),
            snapshot: snapshot.clone(),
        };
        if self.sender.send(command).is_err() {
            self.logger.warn(&format!(
                "Cart snapshot writer is stopped, device {} not persisted",
                self.device_id
            ));
        }
    }
}

/// Sink of a session whose stored cart could not be read. Its snapshots are
/// never written, so the unread record survives.
pub struct DetachedSnapshotSink {
    device_id: DeviceId,
    logger: Arc<dyn Logger>,
}

impl DetachedSnapshotSink {
    pub fn new(device_id: DeviceId, logger: Arc<dyn Logger>) -> Self {
        Self { device_id, logger }
    }
}

impl SnapshotSink for DetachedSnapshotSink {
    fn submit(&self, _snapshot: &CartSnapshot) {
        self.logger.warn(&format!(
            "Stored cart of device {} was not read, change kept in memory only",
            self.device_id
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cart::test_support::{MemoryStore, MockLog, mock_logger};
    use crate::domain::cart::model::{Attributes, CartLineItem, WishlistEntry};
    use crate::domain::shared::value_objects::ProductId;
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use mockall::mock;

    mock! {
        pub Store {}

        #[async_trait]
        impl SnapshotStore for Store {
            async fn read(&self, device_id: &DeviceId) -> Result<Option<String>, RepositoryError>;
            async fn write(&self, device_id: &DeviceId, payload: &str) -> Result<(), RepositoryError>;
            async fn delete(&self, device_id: &DeviceId) -> Result<(), RepositoryError>;
        }
    }

    fn device() -> DeviceId {
        DeviceId::parse("device-1").unwrap()
    }

    fn snapshot_with(quantity: u32) -> CartSnapshot {
        let item = CartLineItem::new(
            ProductId::new("A"),
            Attributes::new(),
            BigDecimal::from(10),
            quantity,
        )
        .unwrap();
        let wish = WishlistEntry {
            product_id: ProductId::new("W"),
        };
        CartSnapshot::from_parts(vec![item], vec![wish]).unwrap()
    }

    #[tokio::test]
    async fn should_load_what_was_saved() {
        let persistence = SnapshotPersistence {
            store: Arc::new(MemoryStore::default()),
            logger: mock_logger(),
        };
        let snapshot = snapshot_with(3);

        persistence.save(&device(), &snapshot).await;
        let loaded = persistence.load(&device()).await;

        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn should_load_empty_snapshot_when_nothing_stored() {
        let mut store = MockStore::new();
        store.expect_read().returning(|_| Ok(None));
        let persistence = SnapshotPersistence {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let loaded = persistence.load(&device()).await;

        assert_eq!(loaded, CartSnapshot::empty());
    }

    #[tokio::test]
    async fn should_discard_corrupt_record_and_start_empty() {
        let mut store = MockStore::new();
        store
            .expect_read()
            .returning(|_| Ok(Some("{\"version\":\"v0\"}".to_string())));
        store.expect_delete().times(1).returning(|_| Ok(()));
        let mut logger = MockLog::new();
        logger.expect_warn().times(1).returning(|_| ());
        logger.expect_debug().returning(|_| ());
        logger.expect_info().returning(|_| ());
        let persistence = SnapshotPersistence {
            store: Arc::new(store),
            logger: Arc::new(logger),
        };

        let loaded = persistence.load(&device()).await;

        assert_eq!(loaded, CartSnapshot::empty());
    }

    #[tokio::test]
    async fn should_start_empty_when_store_unreadable() {
        let mut store = MockStore::new();
        store
            .expect_read()
            .returning(|_| Err(RepositoryError::Unavailable));
        let persistence = SnapshotPersistence {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let loaded = persistence.load(&device()).await;

        assert_eq!(loaded, CartSnapshot::empty());
    }

    #[tokio::test]
    async fn should_report_unreadable_store_without_deleting_record() {
        let mut store = MockStore::new();
        store
            .expect_read()
            .returning(|_| Err(RepositoryError::Unavailable));
        store.expect_delete().times(0);
        let persistence = SnapshotPersistence {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let result = persistence.rehydrate(&device()).await;

        assert_eq!(result.unwrap_err(), RepositoryError::Unavailable);
    }

    #[test]
    fn should_not_forward_snapshots_from_detached_sink() {
        let mut logger = MockLog::new();
        logger.expect_warn().times(1).returning(|_| ());
        let sink = DetachedSnapshotSink::new(device(), Arc::new(logger));

        sink.submit(&snapshot_with(1));
    }

    #[tokio::test]
    async fn should_warn_instead_of_failing_when_write_rejected() {
        let mut store = MockStore::new();
        store
            .expect_write()
            .returning(|_, _| Err(RepositoryError::QuotaExceeded));
        let mut logger = MockLog::new();
        logger.expect_warn().times(1).returning(|_| ());
        let persistence = SnapshotPersistence {
            store: Arc::new(store),
            logger: Arc::new(logger),
        };

        persistence.save(&device(), &snapshot_with(1)).await;
    }

    #[tokio::test]
    async fn should_report_write_failure_from_try_save() {
        let mut store = MockStore::new();
        store
            .expect_write()
            .returning(|_, _| Err(RepositoryError::QuotaExceeded));
        let persistence = SnapshotPersistence {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let result = persistence.try_save(&device(), &snapshot_with(1)).await;

        assert_eq!(
            result.unwrap_err(),
            PersistenceError::WriteFailed(RepositoryError::QuotaExceeded)
        );
    }

    #[tokio::test]
    async fn should_apply_queued_writes_in_order() {
        let store = Arc::new(MemoryStore::default());
        let persistence = Arc::new(SnapshotPersistence {
            store: store.clone(),
            logger: mock_logger(),
        });
        let writer = SnapshotWriter::spawn(persistence.clone());
        let sink = writer.sink(device());

        for quantity in 1..=5 {
            sink.submit(&snapshot_with(quantity));
        }
        writer.flush().await;

        let history = store.history.lock().unwrap().clone();
        let quantities: Vec<u32> = history
            .iter()
            .map(|payload| persisted::decode(payload).unwrap().items()[0].quantity)
            .collect();
        assert_eq!(quantities, vec![1, 2, 3, 4, 5]);
        assert_eq!(persistence.load(&device()).await, snapshot_with(5));
    }

    #[tokio::test]
    async fn should_drain_pending_writes_on_shutdown() {
        let store = Arc::new(MemoryStore::default());
        let persistence = Arc::new(SnapshotPersistence {
            store: store.clone(),
            logger: mock_logger(),
        });
        let writer = SnapshotWriter::spawn(persistence);
        let sink = writer.sink(device());

        sink.submit(&snapshot_with(2));
        writer.shutdown().await;
        // writer is gone; this one is dropped with a warning
        sink.submit(&snapshot_with(9));

        assert_eq!(store.history.lock().unwrap().len(), 1);
    }
}
