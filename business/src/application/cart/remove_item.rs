use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::logger::Logger;

use super::session::CartSessions;

pub struct RemoveCartItemUseCaseImpl {
    pub sessions: Arc<CartSessions>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveCartItemUseCase for RemoveCartItemUseCaseImpl {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<CartSummary, CartError> {
        self.logger.info(&format!(
            "Removing {} from cart of device {}",
            params.product_id, params.device_id
        ));

        let session = self.sessions.session(&params.device_id).await;
        let mut session = session.lock().await;
        session
            .store
            .remove_item(&params.product_id, &params.attributes);

        Ok(session.store.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cart::test_support::{device, mock_logger, sessions};
    use crate::domain::cart::model::Attributes;
    use crate::domain::shared::value_objects::ProductId;
    use bigdecimal::BigDecimal;

    fn size(value: &str) -> Attributes {
        Attributes::from([("size".to_string(), value.to_string())])
    }

    #[tokio::test]
    async fn should_remove_matching_line_only() {
        let sessions = sessions();
        {
            let session = sessions.session(&device("d1")).await;
            let mut session = session.lock().await;
            session
                .store
                .add_item(ProductId::new("A"), size("S"), BigDecimal::from(5), 1)
                .unwrap();
            session
                .store
                .add_item(ProductId::new("A"), size("L"), BigDecimal::from(5), 2)
                .unwrap();
        }
        let use_case = RemoveCartItemUseCaseImpl {
            sessions,
            logger: mock_logger(),
        };

        let summary = use_case
            .execute(RemoveCartItemParams {
                device_id: device("d1"),
                product_id: ProductId::new("A"),
                attributes: size("S"),
            })
            .await
            .unwrap();

        assert_eq!(summary.line_item_count, 1);
        assert_eq!(summary.total_item_count, 2);
    }

    #[tokio::test]
    async fn should_succeed_when_item_absent() {
        let use_case = RemoveCartItemUseCaseImpl {
            sessions: sessions(),
            logger: mock_logger(),
        };

        let summary = use_case
            .execute(RemoveCartItemParams {
                device_id: device("d1"),
                product_id: ProductId::new("ghost"),
                attributes: Attributes::new(),
            })
            .await
            .unwrap();

        assert_eq!(summary.total_item_count, 0);
    }
}
