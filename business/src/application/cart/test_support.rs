use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;

use crate::domain::cart::repository::SnapshotStore;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::DeviceId;

use super::persistence::SnapshotPersistence;
use super::session::{CartSessions, SessionSettings};

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

/// In-memory snapshot store recording every payload it receives.
#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<HashMap<String, String>>,
    pub history: Mutex<Vec<String>>,
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn read(&self, device_id: &DeviceId) -> Result<Option<String>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(device_id.as_str()).cloned())
    }

    async fn write(&self, device_id: &DeviceId, payload: &str) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .unwrap()
            .insert(device_id.as_str().to_string(), payload.to_string());
        self.history.lock().unwrap().push(payload.to_string());
        Ok(())
    }

    async fn delete(&self, device_id: &DeviceId) -> Result<(), RepositoryError> {
        self.records.lock().unwrap().remove(device_id.as_str());
        Ok(())
    }
}

pub fn device(id: &str) -> DeviceId {
    DeviceId::parse(id).unwrap()
}

pub fn sessions_over(store: Arc<dyn SnapshotStore>, settings: SessionSettings) -> Arc<CartSessions> {
    let persistence = Arc::new(SnapshotPersistence {
        store,
        logger: mock_logger(),
    });
    Arc::new(CartSessions::start(persistence, settings))
}

pub fn sessions() -> Arc<CartSessions> {
    sessions_over(Arc::new(MemoryStore::default()), SessionSettings::default())
}
