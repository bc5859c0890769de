use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::DeviceId;

use super::model::CartSnapshot;

/// Device-scoped key-value store holding one serialized snapshot per device.
///
/// The store only ever sees opaque payloads; versioning and validation are
/// done by the cart engine.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn read(&self, device_id: &DeviceId) -> Result<Option<String>, RepositoryError>;
    async fn write(&self, device_id: &DeviceId, payload: &str) -> Result<(), RepositoryError>;
    async fn delete(&self, device_id: &DeviceId) -> Result<(), RepositoryError>;
}

/// Receives every committed snapshot of a cart, in commit order.
///
/// Implementations must return immediately: the caller is a synchronous
/// cart mutation.
pub trait SnapshotSink: Send + Sync {
    fn submit(&self, snapshot: &CartSnapshot);
}
