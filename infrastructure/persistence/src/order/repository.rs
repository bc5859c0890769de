use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use business::domain::cart::model::CartSnapshot;
use business::domain::cart::services::{CheckoutService, OrderReceipt};
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::DeviceId;

use super::entity::OrderEntity;
use crate::db::repository_error;

/// Turns a cart snapshot into an order. The order row and its line rows are
/// written in one transaction.
pub struct CheckoutSqlite {
    pool: SqlitePool,
}

impl CheckoutSqlite {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub async fn find_order_items(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<super::entity::OrderItemEntity>, RepositoryError> {
        sqlx::query_as::<_, super::entity::OrderItemEntity>(
            "SELECT order_id, position, product_id, attributes, quantity, price FROM order_items WHERE order_id = ?1 ORDER BY position",
        )
        .bind(order_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)
    }
}

#[async_trait]
impl CheckoutService for CheckoutSqlite {
    async fn place_order(
        &self,
        device_id: &DeviceId,
        snapshot: &CartSnapshot,
    ) -> Result<OrderReceipt, RepositoryError> {
        let receipt = OrderReceipt {
            order_id: Uuid::new_v4(),
            total: snapshot.total_price(),
            item_count: snapshot.total_item_count(),
            placed_at: Utc::now(),
        };
        let order_id = receipt.order_id.to_string();
        let item_count =
            i64::try_from(receipt.item_count).map_err(|_| RepositoryError::DatabaseError)?;

        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        sqlx::query(
            "INSERT INTO orders (id, device_id, total, item_count, placed_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&order_id)
        .bind(device_id.as_str())
        .bind(receipt.total.to_string())
        .bind(item_count)
        .bind(receipt.placed_at)
        .execute(&mut *tx)
        .await
        .map_err(repository_error)?;

        for (position, item) in snapshot.items().iter().enumerate() {
            let attributes = serde_json::to_string(&item.attributes)
                .map_err(|_| RepositoryError::DatabaseError)?;
            sqlx::query(
                r#"INSERT INTO order_items (order_id, position, product_id, attributes, quantity, price)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            )
            .bind(&order_id)
            .bind(position as i64)
            .bind(item.product_id.as_str())
            .bind(attributes)
            .bind(i64::from(item.quantity))
            .bind(item.price.to_string())
            .execute(&mut *tx)
            .await
            .map_err(repository_error)?;
        }

        tx.commit().await.map_err(repository_error)?;

        tracing::info!(
            target: "storefront",
            "order {} stored for device {} ({} lines)",
            order_id,
            device_id,
            snapshot.line_item_count()
        );
        Ok(receipt)
    }

    async fn find_order(
        &self,
        device_id: &DeviceId,
        order_id: Uuid,
    ) -> Result<Option<OrderReceipt>, RepositoryError> {
        sqlx::query_as::<_, OrderEntity>(
            "SELECT id, device_id, total, item_count, placed_at FROM orders WHERE id = ?1 AND device_id = ?2",
        )
        .bind(order_id.to_string())
        .bind(device_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?
        .map(OrderEntity::into_receipt)
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use bigdecimal::BigDecimal;
    use business::domain::cart::model::{Attributes, CartLineItem};
    use business::domain::shared::value_objects::ProductId;
    use std::str::FromStr;

    fn snapshot() -> CartSnapshot {
        let mut attributes = Attributes::new();
        attributes.insert("size".to_string(), "M".to_string());
        let shirt = CartLineItem::new(
            ProductId::new("shirt"),
            attributes,
            BigDecimal::from_str("12.50").unwrap(),
            2,
        )
        .unwrap();
        let mug = CartLineItem::new(
            ProductId::new("mug"),
            Attributes::new(),
            BigDecimal::from(8),
            1,
        )
        .unwrap();
        CartSnapshot::from_parts(vec![shirt, mug], vec![]).unwrap()
    }

    fn device() -> DeviceId {
        DeviceId::parse("d1").unwrap()
    }

    #[tokio::test]
    async fn should_store_order_with_its_lines() {
        let checkout = CheckoutSqlite::new(memory_pool().await);

        let receipt = checkout.place_order(&device(), &snapshot()).await.unwrap();

        assert_eq!(receipt.total, BigDecimal::from(33));
        assert_eq!(receipt.item_count, 3);
        let stored = checkout
            .find_order(&device(), receipt.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total, receipt.total);
        assert_eq!(stored.item_count, 3);

        let items = checkout.find_order_items(receipt.order_id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, "shirt");
        assert_eq!(items[0].attributes, r#"{"size":"M"}"#);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(BigDecimal::from_str(&items[0].price).unwrap(), BigDecimal::from_str("12.5").unwrap());
        assert_eq!(items[1].product_id, "mug");
    }

    #[tokio::test]
    async fn should_find_nothing_for_unknown_order() {
        let checkout = CheckoutSqlite::new(memory_pool().await);

        let result = checkout.find_order(&device(), Uuid::new_v4()).await;

        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn should_hide_orders_of_other_devices() {
        let checkout = CheckoutSqlite::new(memory_pool().await);
        let receipt = checkout.place_order(&device(), &snapshot()).await.unwrap();

        let other = DeviceId::parse("d2").unwrap();
        let result = checkout.find_order(&other, receipt.order_id).await;

        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn should_leave_no_rows_when_checkout_fails() {
        let pool = memory_pool().await;
        sqlx::query("DROP TABLE order_items")
            .execute(&pool)
            .await
            .unwrap();
        let checkout = CheckoutSqlite::new(pool.clone());

        let result = checkout.place_order(&device(), &snapshot()).await;

        assert_eq!(result.unwrap_err(), RepositoryError::DatabaseError);
        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orders, 0);
    }
}
