use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bigdecimal::BigDecimal;
use poem::Route;
use poem::test::TestClient;
use sqlx::SqlitePool;

use business::application::cart::session::CartSessions;
use business::domain::cart::services::ProductInfo;
use business::domain::shared::value_objects::ProductId;
use persistence::catalog::repository::ProductCatalogSqlite;
use persistence::db::{DatabaseConfig, MIGRATIONS_DIR, create_sqlite_pool, run_migrations};

use crate::config::cart_config::CartConfig;
use crate::setup::dependency_injection::DependencyContainer;
use crate::setup::server::Server;

pub struct TestApp {
    pub client: TestClient<Route>,
    pub sessions: Arc<CartSessions>,
    pub pool: SqlitePool,
}

/// Full application over an in-memory database seeded with two products:
/// `tote` at 10 and `mug` at 4.50.
pub async fn test_app() -> TestApp {
    test_app_with(CartConfig::default()).await
}

pub async fn test_app_with(config: CartConfig) -> TestApp {
    let pool = create_sqlite_pool(&DatabaseConfig {
        connection_string: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout: Duration::from_secs(5),
    })
    .await
    .unwrap();
    run_migrations(&pool, MIGRATIONS_DIR).await.unwrap();

    let catalog = ProductCatalogSqlite::new(pool.clone());
    for (id, name, price) in [("tote", "Canvas Tote", "10"), ("mug", "Enamel Mug", "4.50")] {
        catalog
            .save(&ProductInfo {
                product_id: ProductId::new(id),
                display_name: name.to_string(),
                image_url: None,
                price: BigDecimal::from_str(price).unwrap(),
            })
            .await
            .unwrap();
    }

    let container = DependencyContainer::new(pool.clone(), &config);
    let sessions = container.sessions.clone();
    let app = Route::new().nest("/", Server::api_service(container));

    TestApp {
        client: TestClient::new(app),
        sessions,
        pool,
    }
}
