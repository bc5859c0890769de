use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::services::OrderReceipt;
use crate::domain::shared::value_objects::DeviceId;

pub struct CheckoutParams {
    pub device_id: DeviceId,
}

#[async_trait]
pub trait CheckoutUseCase: Send + Sync {
    async fn execute(&self, params: CheckoutParams) -> Result<OrderReceipt, CartError>;
}

pub struct GetOrderParams {
    pub device_id: DeviceId,
    pub order_id: Uuid,
}

#[async_trait]
pub trait GetOrderUseCase: Send + Sync {
    async fn execute(&self, params: GetOrderParams) -> Result<OrderReceipt, CartError>;
}
