use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::shared::value_objects::{DeviceId, ProductId};

pub struct ToggleWishlistParams {
    pub device_id: DeviceId,
    pub product_id: ProductId,
}

/// Wishlist after a toggle, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistState {
    pub product_ids: Vec<ProductId>,
    pub in_wishlist: bool,
}

#[async_trait]
pub trait ToggleWishlistUseCase: Send + Sync {
    async fn execute(&self, params: ToggleWishlistParams) -> Result<WishlistState, CartError>;
}
