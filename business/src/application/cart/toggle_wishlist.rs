use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::use_cases::toggle_wishlist::{
    ToggleWishlistParams, ToggleWishlistUseCase, WishlistState,
};
use crate::domain::logger::Logger;

use super::session::CartSessions;

pub struct ToggleWishlistUseCaseImpl {
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ToggleWishlistUseCase for ToggleWishlistUseCaseImpl {
    async fn execute(&self, params: ToggleWishlistParams) -> Result<WishlistState, CartError> {
        let session = self.sessions.session(&params.device_id).await;
        let mut session = session.lock().await;
        let in_wishlist = session.store.toggle_wishlist(params.product_id.clone());

        self.logger.info(&format!(
            "Product {} {} wishlist of device {}",
            params.product_id,
            if in_wishlist { "added to" } else { "removed from" },
            params.device_id
        ));

        Ok(WishlistState {
            product_ids: session
                .store
                .snapshot()
                .wishlist()
                .iter()
                .map(|entry| entry.product_id.clone())
                .collect(),
            in_wishlist,
        })
    }
}
