use async_trait::async_trait;
use sqlx::SqlitePool;

use business::domain::cart::services::{ProductCatalog, ProductInfo};
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::ProductId;

use super::entity::ProductEntity;
use crate::db::repository_error;

pub struct ProductCatalogSqlite {
    pool: SqlitePool,
}

impl ProductCatalogSqlite {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts or replaces a catalog entry.
    pub async fn save(&self, product: &ProductInfo) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO products (id, display_name, image_url, price)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO UPDATE SET
                display_name = excluded.display_name,
                image_url = excluded.image_url,
                price = excluded.price"#,
        )
        .bind(product.product_id.as_str())
        .bind(&product.display_name)
        .bind(&product.image_url)
        .bind(product.price.to_string())
        .execute(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for ProductCatalogSqlite {
    async fn find_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<ProductInfo>, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(
            "SELECT id, display_name, image_url, price FROM products WHERE id = ?1",
        )
        .bind(product_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        entity.map(|e| e.into_domain()).transpose()
    }
}
