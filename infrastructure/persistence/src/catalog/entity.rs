use std::str::FromStr;

use bigdecimal::BigDecimal;
use sqlx::FromRow;

use business::domain::cart::services::ProductInfo;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::ProductId;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: String,
    pub display_name: String,
    pub image_url: Option<String>,
    pub price: String,
}

impl ProductEntity {
    pub fn into_domain(self) -> Result<ProductInfo, RepositoryError> {
        let price =
            BigDecimal::from_str(&self.price).map_err(|_| RepositoryError::DatabaseError)?;

        Ok(ProductInfo {
            product_id: ProductId::from(self.id),
            display_name: self.display_name,
            image_url: self.image_url,
            price,
        })
    }
}
