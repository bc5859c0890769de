use std::collections::BTreeMap;

use poem_openapi::Object;

use business::domain::cart::errors::CartError;
use business::domain::cart::model::{CartLineItem, CartSummary};

fn default_quantity() -> i64 {
    1
}

/// Quantities arrive signed so that negative input is reported as a cart
/// error rather than a schema error.
pub fn to_quantity(value: i64) -> Result<u32, CartError> {
    u32::try_from(value).map_err(|_| CartError::InvalidQuantity)
}

#[derive(Debug, Clone, Object)]
pub struct AddCartItemRequest {
    /// Catalog product identifier
    pub product_id: String,
    /// Variant attributes such as size or color
    #[oai(default)]
    pub attributes: BTreeMap<String, String>,
    /// Units to add (default: 1)
    #[oai(default = "default_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Clone, Object)]
pub struct SetCartItemQuantityRequest {
    pub product_id: String,
    #[oai(default)]
    pub attributes: BTreeMap<String, String>,
    /// New quantity, at least 1
    pub quantity: i64,
}

#[derive(Debug, Clone, Object)]
pub struct RemoveCartItemRequest {
    pub product_id: String,
    #[oai(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Object)]
pub struct CartLineItemResponse {
    pub product_id: String,
    pub attributes: BTreeMap<String, String>,
    pub quantity: u32,
    /// Unit price captured when the line was first added
    pub price: String,
    pub subtotal: String,
}

impl From<&CartLineItem> for CartLineItemResponse {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            attributes: item.attributes.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            subtotal: item.subtotal().to_string(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartResponse {
    /// Line items in insertion order
    pub items: Vec<CartLineItemResponse>,
    /// Wishlisted product ids in insertion order
    pub wishlist: Vec<String>,
    pub total_item_count: u64,
    pub line_item_count: u64,
    /// Exact decimal total
    pub total_price: String,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            items: summary
                .snapshot
                .items()
                .iter()
                .map(CartLineItemResponse::from)
                .collect(),
            wishlist: summary
                .snapshot
                .wishlist()
                .iter()
                .map(|entry| entry.product_id.to_string())
                .collect(),
            total_item_count: summary.total_item_count,
            line_item_count: summary.line_item_count as u64,
            total_price: summary.total_price.to_string(),
        }
    }
}
