use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::cart::services::OrderReceipt;

#[derive(Debug, Clone, Object)]
pub struct OrderReceiptResponse {
    pub order_id: String,
    /// Exact decimal total charged
    pub total: String,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
}

impl From<OrderReceipt> for OrderReceiptResponse {
    fn from(receipt: OrderReceipt) -> Self {
        Self {
            order_id: receipt.order_id.to_string(),
            total: receipt.total.to_string(),
            item_count: receipt.item_count,
            placed_at: receipt.placed_at,
        }
    }
}
