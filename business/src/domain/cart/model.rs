use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::errors::CartError;
use crate::domain::shared::value_objects::ProductId;

/// Variant-distinguishing fields of a line item (size, color...).
/// An empty map means the item has no variant.
pub type Attributes = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub attributes: Attributes,
    pub quantity: u32,
    /// Unit price captured when the item was first added.
    pub price: BigDecimal,
}

impl CartLineItem {
    pub fn new(
        product_id: ProductId,
        attributes: Attributes,
        price: BigDecimal,
        quantity: u32,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if price < BigDecimal::zero() {
            return Err(CartError::InvalidPrice);
        }

        Ok(Self {
            product_id,
            attributes,
            quantity,
            price,
        })
    }

    pub fn matches(&self, product_id: &ProductId, attributes: &Attributes) -> bool {
        self.product_id == *product_id && self.attributes == *attributes
    }

    pub fn subtotal(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistEntry {
    pub product_id: ProductId,
}

/// Complete cart and wishlist state of one device.
///
/// Line items keep insertion order. `(product_id, attributes)` is unique
/// across items and a product id appears at most once in the wishlist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    items: Vec<CartLineItem>,
    wishlist: Vec<WishlistEntry>,
}

impl CartSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuilds a snapshot from stored parts, checking every invariant.
    pub fn from_parts(
        items: Vec<CartLineItem>,
        wishlist: Vec<WishlistEntry>,
    ) -> Result<Self, String> {
        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(format!("line item {} has zero quantity", item.product_id));
            }
            if item.price < BigDecimal::zero() {
                return Err(format!("line item {} has a negative price", item.product_id));
            }
            if items
                .iter()
                .skip(index + 1)
                .any(|other| other.matches(&item.product_id, &item.attributes))
            {
                return Err(format!("duplicate line item {}", item.product_id));
            }
        }

        for (index, entry) in wishlist.iter().enumerate() {
            if wishlist
                .iter()
                .skip(index + 1)
                .any(|other| other.product_id == entry.product_id)
            {
                return Err(format!("duplicate wishlist entry {}", entry.product_id));
            }
        }

        Ok(Self { items, wishlist })
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    pub fn position(&self, product_id: &ProductId, attributes: &Attributes) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.matches(product_id, attributes))
    }

    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist
            .iter()
            .any(|entry| entry.product_id == *product_id)
    }

    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn total_price(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::zero(), |total, item| total + item.subtotal())
    }

    pub fn line_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<CartLineItem> {
        &mut self.items
    }

    pub(crate) fn wishlist_mut(&mut self) -> &mut Vec<WishlistEntry> {
        &mut self.wishlist
    }
}

/// Optional bounds applied by the cart. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartLimits {
    pub max_quantity_per_line: Option<u32>,
    pub max_line_items: Option<usize>,
}

impl CartLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Caps a quantity at the per-line maximum. Never returns zero for a
    /// positive input.
    pub fn clamp_quantity(&self, quantity: u32) -> u32 {
        match self.max_quantity_per_line {
            Some(max) => quantity.min(max.max(1)),
            None => quantity,
        }
    }

    pub fn allows_new_line(&self, current_lines: usize) -> bool {
        self.max_line_items
            .is_none_or(|max| current_lines < max)
    }
}

/// Read-only projection handed to callers: the snapshot plus its aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub snapshot: CartSnapshot,
    pub total_item_count: u64,
    pub line_item_count: usize,
    pub total_price: BigDecimal,
}

impl From<&CartSnapshot> for CartSummary {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            snapshot: snapshot.clone(),
            total_item_count: snapshot.total_item_count(),
            line_item_count: snapshot.line_item_count(),
            total_price: snapshot.total_price(),
        }
    }
}
