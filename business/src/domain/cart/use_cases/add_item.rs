use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Attributes, CartSummary};
use crate::domain::shared::value_objects::{DeviceId, ProductId};

pub struct AddCartItemParams {
    pub device_id: DeviceId,
    pub product_id: ProductId,
    pub attributes: Attributes,
    pub quantity: u32,
}

#[async_trait]
pub trait AddCartItemUseCase: Send + Sync {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartSummary, CartError>;
}
