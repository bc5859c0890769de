use std::env;
use std::str::FromStr;

use business::application::cart::session::SessionSettings;
use business::domain::cart::model::CartLimits;

/// Cart engine configuration
#[derive(Debug, Clone, Copy)]
pub struct CartConfig {
    pub limits: CartLimits,
    pub auto_open_on_add: bool,
    pub event_capacity: usize,
    pub max_sessions: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            limits: CartLimits::unbounded(),
            auto_open_on_add: true,
            event_capacity: 64,
            max_sessions: 10_000,
        }
    }
}

impl CartConfig {
    /// Load cart configuration from environment variables
    ///
    /// Environment variables:
    /// - CART_MAX_QUANTITY_PER_LINE: per-line quantity cap (default: unbounded)
    /// - CART_MAX_LINE_ITEMS: distinct line cap (default: unbounded)
    /// - CART_AUTO_OPEN_ON_ADD: open the cart panel after an add (default: true)
    /// - CART_EVENT_CAPACITY: per-device event buffer (default: 64)
    /// - CART_MAX_SESSIONS: device sessions kept in memory (default: 10000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Values that are present but unparseable fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            limits: CartLimits {
                max_quantity_per_line: parse(&lookup, "CART_MAX_QUANTITY_PER_LINE"),
                max_line_items: parse(&lookup, "CART_MAX_LINE_ITEMS"),
            },
            auto_open_on_add: parse(&lookup, "CART_AUTO_OPEN_ON_ADD")
                .unwrap_or(defaults.auto_open_on_add),
            event_capacity: parse::<usize>(&lookup, "CART_EVENT_CAPACITY")
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.event_capacity),
            max_sessions: parse::<usize>(&lookup, "CART_MAX_SESSIONS")
                .filter(|max| *max > 0)
                .unwrap_or(defaults.max_sessions),
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            limits: self.limits,
            event_capacity: self.event_capacity,
            max_sessions: self.max_sessions,
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}
