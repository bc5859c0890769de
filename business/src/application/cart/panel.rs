use crate::domain::cart::events::{CartEvent, Panel};

use super::events::CartEventBus;

/// Open/closed state of the cart and wishlist overlays.
///
/// State is a plain boolean per panel, so any number of triggers may call
/// [`PanelChannel::open`]. Events go out only on transitions.
pub struct PanelChannel {
    cart_open: bool,
    wishlist_open: bool,
    events: CartEventBus,
}

impl PanelChannel {
    pub fn new(events: CartEventBus) -> Self {
        Self {
            cart_open: false,
            wishlist_open: false,
            events,
        }
    }

    pub fn open(&mut self, panel: Panel) {
        self.set(panel, true);
    }

    pub fn close(&mut self, panel: Panel) {
        self.set(panel, false);
    }

    pub fn toggle(&mut self, panel: Panel) -> bool {
        let open = !self.is_open(panel);
        self.set(panel, open);
        open
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Cart => self.cart_open,
            Panel::Wishlist => self.wishlist_open,
        }
    }

    fn set(&mut self, panel: Panel, open: bool) {
        let slot = match panel {
            Panel::Cart => &mut self.cart_open,
            Panel::Wishlist => &mut self.wishlist_open,
        };
        if *slot == open {
            return;
        }
        *slot = open;
        self.events.publish(CartEvent::PanelChanged { panel, open });
    }
}
