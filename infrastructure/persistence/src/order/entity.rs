use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart::services::OrderReceipt;
use business::domain::errors::RepositoryError;

#[derive(Debug, FromRow)]
pub struct OrderEntity {
    pub id: String,
    pub device_id: String,
    pub total: String,
    pub item_count: i64,
    pub placed_at: DateTime<Utc>,
}

impl OrderEntity {
    pub fn into_receipt(self) -> Result<OrderReceipt, RepositoryError> {
        Ok(OrderReceipt {
            order_id: Uuid::parse_str(&self.id).map_err(|_| RepositoryError::DatabaseError)?,
            total: BigDecimal::from_str(&self.total).map_err(|_| RepositoryError::DatabaseError)?,
            item_count: u64::try_from(self.item_count)
                .map_err(|_| RepositoryError::DatabaseError)?,
            placed_at: self.placed_at,
        })
    }
}

#[cfg(test)]
#[derive(Debug, FromRow)]
pub struct OrderItemEntity {
    pub order_id: String,
    pub position: i64,
    pub product_id: String,
    pub attributes: String,
    pub quantity: i64,
    pub price: String,
}
