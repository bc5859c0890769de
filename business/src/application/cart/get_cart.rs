use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::use_cases::get_cart::{GetCartParams, GetCartUseCase};
use crate::domain::logger::Logger;

use super::session::CartSessions;

pub struct GetCartUseCaseImpl {
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartUseCase for GetCartUseCaseImpl {
    async fn execute(&self, params: GetCartParams) -> Result<CartSummary, CartError> {
        self.logger
            .debug(&format!("Getting cart of device {}", params.device_id));

        let session = self.sessions.session(&params.device_id).await;
        let summary = session.lock().await.store.summary();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cart::session::SessionSettings;
    use crate::application::cart::test_support::{MemoryStore, device, mock_logger, sessions_over};
    use crate::domain::cart::model::{Attributes, CartLineItem, CartSnapshot};
    use crate::domain::cart::persisted;
    use crate::domain::shared::value_objects::ProductId;
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn should_return_empty_cart_for_new_device() {
        let use_case = GetCartUseCaseImpl {
            sessions: sessions_over(Arc::new(MemoryStore::default()), SessionSettings::default()),
            logger: mock_logger(),
        };

        let summary = use_case
            .execute(GetCartParams {
                device_id: device("new"),
            })
            .await
            .unwrap();

        assert_eq!(summary.total_item_count, 0);
        assert_eq!(summary.line_item_count, 0);
    }

    #[tokio::test]
    async fn should_return_stored_cart() {
        let item = CartLineItem::new(
            ProductId::new("A"),
            Attributes::new(),
            BigDecimal::from(7),
            2,
        )
        .unwrap();
        let stored = CartSnapshot::from_parts(vec![item], vec![]).unwrap();
        let store = MemoryStore::default();
        store
            .records
            .lock()
            .unwrap()
            .insert("d1".to_string(), persisted::encode(&stored).unwrap());
        let use_case = GetCartUseCaseImpl {
            sessions: sessions_over(Arc::new(store), SessionSettings::default()),
            logger: mock_logger(),
        };

        let summary = use_case
            .execute(GetCartParams {
                device_id: device("d1"),
            })
            .await
            .unwrap();

        assert_eq!(summary.snapshot, stored);
        assert_eq!(summary.total_price, BigDecimal::from(14));
    }
}
