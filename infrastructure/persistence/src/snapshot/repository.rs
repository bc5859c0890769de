use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use business::domain::cart::persisted::SNAPSHOT_KEY;
use business::domain::cart::repository::SnapshotStore;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::DeviceId;

use super::entity::SnapshotEntity;
use crate::db::repository_error;

/// One row per device under the fixed snapshot key. The payload is stored
/// as-is; decoding belongs to the cart engine.
pub struct SnapshotStoreSqlite {
    pool: SqlitePool,
}

impl SnapshotStoreSqlite {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotStore for SnapshotStoreSqlite {
    async fn read(&self, device_id: &DeviceId) -> Result<Option<String>, RepositoryError> {
        let entity = sqlx::query_as::<_, SnapshotEntity>(
            "SELECT device_id, key, payload, updated_at FROM cart_snapshots WHERE device_id = ?1 AND key = ?2",
        )
        .bind(device_id.as_str())
        .bind(SNAPSHOT_KEY)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(entity.map(|e| e.payload))
    }

    async fn write(&self, device_id: &DeviceId, payload: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO cart_snapshots (device_id, key, payload, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (device_id, key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at"#,
        )
        .bind(device_id.as_str())
        .bind(SNAPSHOT_KEY)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(())
    }

    async fn delete(&self, device_id: &DeviceId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_snapshots WHERE device_id = ?1 AND key = ?2")
            .bind(device_id.as_str())
            .bind(SNAPSHOT_KEY)
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    fn device(id: &str) -> DeviceId {
        DeviceId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn should_return_none_when_nothing_stored() {
        let store = SnapshotStoreSqlite::new(memory_pool().await);

        let payload = store.read(&device("d1")).await.unwrap();

        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn should_overwrite_previous_payload() {
        let store = SnapshotStoreSqlite::new(memory_pool().await);

        store.write(&device("d1"), "first").await.unwrap();
        store.write(&device("d1"), "second").await.unwrap();

        assert_eq!(
            store.read(&device("d1")).await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn should_scope_payloads_by_device() {
        let store = SnapshotStoreSqlite::new(memory_pool().await);

        store.write(&device("d1"), "one").await.unwrap();
        store.write(&device("d2"), "two").await.unwrap();
        store.delete(&device("d1")).await.unwrap();

        assert!(store.read(&device("d1")).await.unwrap().is_none());
        assert_eq!(
            store.read(&device("d2")).await.unwrap().as_deref(),
            Some("two")
        );
    }

    #[tokio::test]
    async fn should_report_unavailable_when_pool_closed() {
        let pool = memory_pool().await;
        let store = SnapshotStoreSqlite::new(pool.clone());
        pool.close().await;

        let result = store.write(&device("d1"), "payload").await;

        assert_eq!(result.unwrap_err(), RepositoryError::Unavailable);
    }
}
