use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::events::Panel;
use crate::domain::cart::services::{CheckoutService, OrderReceipt};
use crate::domain::cart::use_cases::checkout::{
    CheckoutParams, CheckoutUseCase, GetOrderParams, GetOrderUseCase,
};
use crate::domain::logger::Logger;

use super::session::CartSessions;

pub struct CheckoutUseCaseImpl {
    pub sessions: Arc<CartSessions>,
    pub checkout: Arc<dyn CheckoutService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CheckoutUseCase for CheckoutUseCaseImpl {
    async fn execute(&self, params: CheckoutParams) -> Result<OrderReceipt, CartError> {
        self.logger
            .info(&format!("Checking out cart of device {}", params.device_id));

        // The session stays locked until the order is settled so the submitted
        // snapshot is exactly the one that gets cleared.
        let session = self.sessions.session(&params.device_id).await;
        let mut session = session.lock().await;
        if session.store.line_item_count() == 0 {
            return Err(CartError::EmptyCart);
        }

        let snapshot = session.store.snapshot().clone();
        let receipt = match self.checkout.place_order(&params.device_id, &snapshot).await {
            Ok(receipt) => receipt,
            Err(err) => {
                self.logger.error(&format!(
                    "Checkout failed for device {}: {}",
                    params.device_id, err
                ));
                return Err(err.into());
            }
        };

        session.store.clear();
        session.panels.close(Panel::Cart);

        self.logger.info(&format!(
            "Order {} placed for device {} (total {})",
            receipt.order_id, params.device_id, receipt.total
        ));
        Ok(receipt)
    }
}

pub struct GetOrderUseCaseImpl {
    pub checkout: Arc<dyn CheckoutService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrderUseCase for GetOrderUseCaseImpl {
    async fn execute(&self, params: GetOrderParams) -> Result<OrderReceipt, CartError> {
        match self
            .checkout
            .find_order(&params.device_id, params.order_id)
            .await
        {
            Ok(Some(receipt)) => Ok(receipt),
            Ok(None) => Err(CartError::OrderNotFound),
            Err(err) => {
                self.logger.error(&format!(
                    "Order {} lookup failed for device {}: {}",
                    params.order_id, params.device_id, err
                ));
                Err(err.into())
            }
        }
    }
}
