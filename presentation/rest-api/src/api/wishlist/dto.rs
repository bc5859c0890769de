use poem_openapi::Object;

use business::domain::cart::model::CartSummary;
use business::domain::cart::use_cases::toggle_wishlist::WishlistState;

#[derive(Debug, Clone, Object)]
pub struct WishlistResponse {
    /// Product ids in the order they were wishlisted
    pub product_ids: Vec<String>,
    pub count: u64,
}

impl From<CartSummary> for WishlistResponse {
    fn from(summary: CartSummary) -> Self {
        let product_ids: Vec<String> = summary
            .snapshot
            .wishlist()
            .iter()
            .map(|entry| entry.product_id.to_string())
            .collect();
        Self {
            count: product_ids.len() as u64,
            product_ids,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ToggleWishlistResponse {
    pub product_ids: Vec<String>,
    /// Whether the toggled product is wishlisted now
    pub in_wishlist: bool,
}

impl From<WishlistState> for ToggleWishlistResponse {
    fn from(state: WishlistState) -> Self {
        Self {
            product_ids: state
                .product_ids
                .into_iter()
                .map(|id| id.to_string())
                .collect(),
            in_wishlist: state.in_wishlist,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct WishlistMembershipResponse {
    pub product_id: String,
    pub in_wishlist: bool,
}
