use std::sync::Arc;

use super::model::CartSnapshot;

/// Overlay panels driven by the UI-coordination channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Cart,
    Wishlist,
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Panel::Cart => write!(f, "cart"),
            Panel::Wishlist => write!(f, "wishlist"),
        }
    }
}

impl std::str::FromStr for Panel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(Panel::Cart),
            "wishlist" => Ok(Panel::Wishlist),
            _ => Err(format!("Invalid panel: {}", s)),
        }
    }
}

/// Change notifications delivered to subscribers of a cart session.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// Published after every effective cart or wishlist mutation.
    SnapshotChanged(Arc<CartSnapshot>),
    /// Published only when a panel actually flips state.
    PanelChanged { panel: Panel, open: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_panel_names() {
        assert_eq!("cart".parse::<Panel>().unwrap(), Panel::Cart);
        assert_eq!("wishlist".parse::<Panel>().unwrap(), Panel::Wishlist);
        assert!("drawer".parse::<Panel>().is_err());
    }

    #[test]
    fn should_display_panel_names() {
        assert_eq!(Panel::Cart.to_string(), "cart");
        assert_eq!(Panel::Wishlist.to_string(), "wishlist");
    }
}
