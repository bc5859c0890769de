use crate::domain::errors::RepositoryError;

/// Errors surfaced to callers of cart operations.
/// A failed operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartError {
    #[error("cart.invalid_quantity")]
    InvalidQuantity,
    #[error("cart.invalid_price")]
    InvalidPrice,
    #[error("cart.line_item_limit_reached")]
    LineItemLimitReached,
    #[error("cart.line_item_not_found")]
    LineItemNotFound,
    #[error("cart.product_not_found")]
    ProductNotFound,
    #[error("cart.empty")]
    EmptyCart,
    #[error("cart.order_not_found")]
    OrderNotFound,
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

/// Durable store failures. These are handled inside the cart engine
/// (logged and degraded) and never reach the caller of a cart operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PersistenceError {
    #[error("cart.persistence_write_failed")]
    WriteFailed(#[source] RepositoryError),
    #[error("cart.persistence_read_corrupt: {0}")]
    ReadCorrupt(String),
    #[error("cart.persistence_encode_failed: {0}")]
    EncodeFailed(String),
}
