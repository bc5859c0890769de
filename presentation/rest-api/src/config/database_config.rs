use persistence::db::{DatabaseConfig, MIGRATIONS_DIR, create_sqlite_pool, run_migrations};
use sqlx::SqlitePool;
use std::env;

/// Initialize database connection pool from environment variables and bring
/// the schema up to date
///
/// Environment variables:
/// - DATABASE_URL: SQLite connection string (default: "sqlite://storefront.db")
/// - DATABASE_MIGRATIONS_PATH: migrations directory (default: the one shipped
///   with the persistence crate)
///
/// # Errors
/// Returns error if the connection or a migration fails
pub async fn init_database() -> anyhow::Result<SqlitePool> {
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://storefront.db".to_string());
    let migrations =
        env::var("DATABASE_MIGRATIONS_PATH").unwrap_or_else(|_| MIGRATIONS_DIR.to_string());

    let pool = create_sqlite_pool(&DatabaseConfig::new(db_url)).await?;
    run_migrations(&pool, &migrations).await?;
    tracing::info!("database ready, migrations applied from {}", migrations);
    Ok(pool)
}
