use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Attributes, CartSummary};
use crate::domain::shared::value_objects::{DeviceId, ProductId};

pub struct RemoveCartItemParams {
    pub device_id: DeviceId,
    pub product_id: ProductId,
    pub attributes: Attributes,
}

#[async_trait]
pub trait RemoveCartItemUseCase: Send + Sync {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<CartSummary, CartError>;
}
