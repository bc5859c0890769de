use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::use_cases::set_quantity::{
    SetCartItemQuantityParams, SetCartItemQuantityUseCase,
};
use crate::domain::logger::Logger;

use super::session::CartSessions;

pub struct SetCartItemQuantityUseCaseImpl {
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SetCartItemQuantityUseCase for SetCartItemQuantityUseCaseImpl {
    async fn execute(
        &self,
        params: SetCartItemQuantityParams,
    ) -> Result<CartSummary, CartError> {
        self.logger.info(&format!(
            "Setting quantity of {} to {} for device {}",
            params.product_id, params.quantity, params.device_id
        ));

        let session = self.sessions.session(&params.device_id).await;
        let mut session = session.lock().await;
        if let Err(err) =
            session
                .store
                .set_quantity(&params.product_id, &params.attributes, params.quantity)
        {
            self.logger.warn(&format!(
                "Quantity update rejected for device {}: {}",
                params.device_id, err
            ));
            return Err(err);
        }

        Ok(session.store.summary())
    }
}
