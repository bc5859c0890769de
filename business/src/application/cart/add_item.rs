use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::events::Panel;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::services::ProductCatalog;
use crate::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::logger::Logger;

use super::session::CartSessions;

pub struct AddCartItemUseCaseImpl {
    pub sessions: Arc<CartSessions>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub logger: Arc<dyn Logger>,
    /// Opens the cart panel after a successful add.
    pub auto_open_panel: bool,
}

#[async_trait]
impl AddCartItemUseCase for AddCartItemUseCaseImpl {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartSummary, CartError> {
        self.logger.info(&format!(
            "Adding {} x {} to cart of device {}",
            params.quantity, params.product_id, params.device_id
        ));

        if params.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        // Price is snapshotted here and never re-fetched for this line.
        let product = self
            .catalog
            .find_product(&params.product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        let session = self.sessions.session(&params.device_id).await;
        let mut session = session.lock().await;
        session.store.add_item(
            product.product_id,
            params.attributes,
            product.price,
            params.quantity,
        )?;
        if self.auto_open_panel {
            session.panels.open(Panel::Cart);
        }

        let summary = session.store.summary();
        self.logger.info(&format!(
            "Cart of device {} now holds {} items",
            params.device_id, summary.total_item_count
        ));
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cart::test_support::{device, mock_logger, sessions};
    use crate::domain::cart::services::ProductInfo;
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::value_objects::ProductId;
    use bigdecimal::BigDecimal;
    use mockall::mock;

    mock! {
        pub Catalog {}

        #[async_trait]
        impl ProductCatalog for Catalog {
            async fn find_product(&self, product_id: &ProductId) -> Result<Option<ProductInfo>, RepositoryError>;
        }
    }

    fn catalog_with_price(price: i64) -> MockCatalog {
        let mut catalog = MockCatalog::new();
        catalog.expect_find_product().returning(move |id| {
            Ok(Some(ProductInfo {
                product_id: id.clone(),
                display_name: "Canvas Tote".to_string(),
                image_url: None,
                price: BigDecimal::from(price),
            }))
        });
        catalog
    }

    fn params(quantity: u32) -> AddCartItemParams {
        AddCartItemParams {
            device_id: device("d1"),
            product_id: ProductId::new("tote"),
            attributes: Default::default(),
            quantity,
        }
    }

    #[tokio::test]
    async fn should_add_item_with_catalog_price() {
        let use_case = AddCartItemUseCaseImpl {
            sessions: sessions(),
            catalog: Arc::new(catalog_with_price(10)),
            logger: mock_logger(),
            auto_open_panel: false,
        };

        let summary = use_case.execute(params(2)).await.unwrap();

        assert_eq!(summary.total_item_count, 2);
        assert_eq!(summary.total_price, BigDecimal::from(20));
        assert_eq!(summary.line_item_count, 1);
    }

    #[tokio::test]
    async fn should_merge_repeated_adds_into_one_line() {
        let use_case = AddCartItemUseCaseImpl {
            sessions: sessions(),
            catalog: Arc::new(catalog_with_price(10)),
            logger: mock_logger(),
            auto_open_panel: false,
        };

        use_case.execute(params(2)).await.unwrap();
        let summary = use_case.execute(params(1)).await.unwrap();

        assert_eq!(summary.total_item_count, 3);
        assert_eq!(summary.total_price, BigDecimal::from(30));
        assert_eq!(summary.line_item_count, 1);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_product() {
        let mut catalog = MockCatalog::new();
        catalog.expect_find_product().returning(|_| Ok(None));
        let use_case = AddCartItemUseCaseImpl {
            sessions: sessions(),
            catalog: Arc::new(catalog),
            logger: mock_logger(),
            auto_open_panel: false,
        };

        let result = use_case.execute(params(1)).await;

        assert!(matches!(result.unwrap_err(), CartError::ProductNotFound));
    }

    #[tokio::test]
    async fn should_reject_zero_quantity_without_catalog_lookup() {
        let mut catalog = MockCatalog::new();
        catalog.expect_find_product().times(0);
        let use_case = AddCartItemUseCaseImpl {
            sessions: sessions(),
            catalog: Arc::new(catalog),
            logger: mock_logger(),
            auto_open_panel: false,
        };

        let result = use_case.execute(params(0)).await;

        assert!(matches!(result.unwrap_err(), CartError::InvalidQuantity));
    }

    #[tokio::test]
    async fn should_propagate_catalog_failure() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_find_product()
            .returning(|_| Err(RepositoryError::DatabaseError));
        let use_case = AddCartItemUseCaseImpl {
            sessions: sessions(),
            catalog: Arc::new(catalog),
            logger: mock_logger(),
            auto_open_panel: false,
        };

        let result = use_case.execute(params(1)).await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::Repository(RepositoryError::DatabaseError)
        ));
    }

    #[tokio::test]
    async fn should_open_cart_panel_after_add_when_enabled() {
        let sessions = sessions();
        let use_case = AddCartItemUseCaseImpl {
            sessions: sessions.clone(),
            catalog: Arc::new(catalog_with_price(4)),
            logger: mock_logger(),
            auto_open_panel: true,
        };

        use_case.execute(params(1)).await.unwrap();

        let session = sessions.session(&device("d1")).await;
        assert!(session.lock().await.panels.is_open(Panel::Cart));
    }
}
