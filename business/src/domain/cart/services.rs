use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::{DeviceId, ProductId};

use super::model::CartSnapshot;

/// Catalog data looked up when a product is added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub product_id: ProductId,
    pub display_name: String,
    pub image_url: Option<String>,
    pub price: BigDecimal,
}

/// Service port for the product catalog.
///
/// Only the price is kept by the cart, as a snapshot taken at add time.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<ProductInfo>, RepositoryError>;
}

/// Confirmation returned by checkout once an order has been accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: Uuid,
    pub total: BigDecimal,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
}

/// Service port for checkout. Reads the final snapshot and builds an order;
/// the cart knows nothing about what happens next.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    async fn place_order(
        &self,
        device_id: &DeviceId,
        snapshot: &CartSnapshot,
    ) -> Result<OrderReceipt, RepositoryError>;

    /// Receipt of an order placed by `device_id`; orders of other devices are
    /// not visible.
    async fn find_order(
        &self,
        device_id: &DeviceId,
        order_id: Uuid,
    ) -> Result<Option<OrderReceipt>, RepositoryError>;
}
