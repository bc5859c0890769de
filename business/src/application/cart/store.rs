use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::events::CartEvent;
use crate::domain::cart::model::{
    Attributes, CartLimits, CartLineItem, CartSnapshot, CartSummary, WishlistEntry,
};
use crate::domain::cart::repository::SnapshotSink;
use crate::domain::shared::value_objects::ProductId;

use super::events::CartEventBus;

/// Single source of truth for one device's cart and wishlist.
///
/// Every mutation validates first and mutates second, so a rejected call
/// leaves the snapshot untouched. Each effective mutation is handed to the
/// snapshot sink and announced on the event bus before the call returns.
/// Calls that change nothing (removing a missing item, clearing an empty
/// cart) do neither.
pub struct CartStore {
    snapshot: CartSnapshot,
    limits: CartLimits,
    sink: Arc<dyn SnapshotSink>,
    events: CartEventBus,
}

impl CartStore {
    pub fn new(
        snapshot: CartSnapshot,
        limits: CartLimits,
        sink: Arc<dyn SnapshotSink>,
        events: CartEventBus,
    ) -> Self {
        Self {
            snapshot,
            limits,
            sink,
            events,
        }
    }

    pub fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&self.snapshot)
    }

    pub fn limits(&self) -> CartLimits {
        self.limits
    }

    /// Adds `quantity` units of a line item, merging with an existing entry of
    /// the same product and attributes. A merged entry keeps the price it was
    /// first added with.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        attributes: Attributes,
        price: BigDecimal,
        quantity: u32,
    ) -> Result<&CartSnapshot, CartError> {
        let candidate = CartLineItem::new(product_id, attributes, price, quantity)?;
        let limits = self.limits;

        if let Some(existing) = self
            .snapshot
            .items_mut()
            .iter_mut()
            .find(|item| item.matches(&candidate.product_id, &candidate.attributes))
        {
            existing.quantity =
                limits.clamp_quantity(existing.quantity.saturating_add(candidate.quantity));
        } else {
            if !limits.allows_new_line(self.snapshot.line_item_count()) {
                return Err(CartError::LineItemLimitReached);
            }
            let quantity = limits.clamp_quantity(candidate.quantity);
            self.snapshot
                .items_mut()
                .push(CartLineItem { quantity, ..candidate });
        }

        self.commit();
        Ok(&self.snapshot)
    }

    pub fn remove_item(&mut self, product_id: &ProductId, attributes: &Attributes) -> &CartSnapshot {
        if let Some(index) = self.snapshot.position(product_id, attributes) {
            self.snapshot.items_mut().remove(index);
            self.commit();
        }
        &self.snapshot
    }

    /// Overwrites the quantity of an existing line item in place.
    /// Zero is rejected: removal goes through [`CartStore::remove_item`].
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        attributes: &Attributes,
        quantity: u32,
    ) -> Result<&CartSnapshot, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let quantity = self.limits.clamp_quantity(quantity);

        let item = self
            .snapshot
            .items_mut()
            .iter_mut()
            .find(|item| item.matches(product_id, attributes))
            .ok_or(CartError::LineItemNotFound)?;

        if item.quantity != quantity {
            item.quantity = quantity;
            self.commit();
        }
        Ok(&self.snapshot)
    }

    /// Empties the line items. The wishlist is kept.
    pub fn clear(&mut self) -> &CartSnapshot {
        if self.snapshot.line_item_count() > 0 {
            self.snapshot.items_mut().clear();
            self.commit();
        }
        &self.snapshot
    }

    /// Flips wishlist membership and returns the new membership. A product
    /// that is added again goes to the end of the wishlist.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> bool {
        let wishlist = self.snapshot.wishlist_mut();
        let now_in_wishlist = match wishlist
            .iter()
            .position(|entry| entry.product_id == product_id)
        {
            Some(index) => {
                wishlist.remove(index);
                false
            }
            None => {
                wishlist.push(WishlistEntry { product_id });
                true
            }
        };

        self.commit();
        now_in_wishlist
    }

    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.snapshot.is_in_wishlist(product_id)
    }

    pub fn total_item_count(&self) -> u64 {
        self.snapshot.total_item_count()
    }

    pub fn total_price(&self) -> BigDecimal {
        self.snapshot.total_price()
    }

    pub fn line_item_count(&self) -> usize {
        self.snapshot.line_item_count()
    }

    pub fn wishlist_count(&self) -> usize {
        self.snapshot.wishlist_count()
    }

    fn commit(&self) {
        self.sink.submit(&self.snapshot);
        self.events
            .publish(CartEvent::SnapshotChanged(Arc::new(self.snapshot.clone())));
    }
}
