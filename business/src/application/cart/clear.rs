use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;

use super::session::CartSessions;

pub struct ClearCartUseCaseImpl {
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<CartSummary, CartError> {
        self.logger
            .info(&format!("Clearing cart of device {}", params.device_id));

        let session = self.sessions.session(&params.device_id).await;
        let mut session = session.lock().await;
        let removed = session.store.line_item_count();
        session.store.clear();

        self.logger.info(&format!(
            "Cleared {} line items for device {}",
            removed, params.device_id
        ));
        Ok(session.store.summary())
    }
}
