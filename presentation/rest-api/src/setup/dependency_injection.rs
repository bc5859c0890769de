use std::sync::Arc;

use sqlx::SqlitePool;

use logger::TracingLogger;
use persistence::catalog::repository::ProductCatalogSqlite;
use persistence::order::repository::CheckoutSqlite;
use persistence::snapshot::repository::SnapshotStoreSqlite;

use business::application::cart::add_item::AddCartItemUseCaseImpl;
use business::application::cart::checkout::{CheckoutUseCaseImpl, GetOrderUseCaseImpl};
use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::get_cart::GetCartUseCaseImpl;
use business::application::cart::persistence::SnapshotPersistence;
use business::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use business::application::cart::session::CartSessions;
use business::application::cart::set_quantity::SetCartItemQuantityUseCaseImpl;
use business::application::cart::toggle_wishlist::ToggleWishlistUseCaseImpl;
use business::application::cart::update_panel::{GetPanelsUseCaseImpl, UpdatePanelUseCaseImpl};

use crate::config::cart_config::CartConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub cart_api: crate::api::cart::routes::CartApi,
    pub wishlist_api: crate::api::wishlist::routes::WishlistApi,
    pub panel_api: crate::api::panel::routes::PanelApi,
    pub checkout_api: crate::api::checkout::routes::CheckoutApi,
    /// Kept to flush pending cart writes on shutdown
    pub sessions: Arc<CartSessions>,
}

impl DependencyContainer {
    /// Must be called inside the tokio runtime: starts the snapshot writer.
    pub fn new(pool: SqlitePool, cart_config: &CartConfig) -> Self {
        let logger = Arc::new(TracingLogger);

        // Infrastructure adapters
        let snapshot_store = Arc::new(SnapshotStoreSqlite::new(pool.clone()));
        let catalog = Arc::new(ProductCatalogSqlite::new(pool.clone()));
        let checkout = Arc::new(CheckoutSqlite::new(pool));

        // Cart engine
        let persistence = Arc::new(SnapshotPersistence {
            store: snapshot_store,
            logger: logger.clone(),
        });
        let sessions = Arc::new(CartSessions::start(
            persistence,
            cart_config.session_settings(),
        ));

        // Cart use cases
        let get_cart_use_case = Arc::new(GetCartUseCaseImpl {
            sessions: sessions.clone(),
            logger: logger.clone(),
        });
        let add_item_use_case = Arc::new(AddCartItemUseCaseImpl {
            sessions: sessions.clone(),
            catalog,
            logger: logger.clone(),
            auto_open_panel: cart_config.auto_open_on_add,
        });
        let set_quantity_use_case = Arc::new(SetCartItemQuantityUseCaseImpl {
            sessions: sessions.clone(),
            logger: logger.clone(),
        });
        let remove_item_use_case = Arc::new(RemoveCartItemUseCaseImpl {
            sessions: sessions.clone(),
            logger: logger.clone(),
        });
        let clear_use_case = Arc::new(ClearCartUseCaseImpl {
            sessions: sessions.clone(),
            logger: logger.clone(),
        });

        // Wishlist and panel use cases
        let toggle_wishlist_use_case = Arc::new(ToggleWishlistUseCaseImpl {
            sessions: sessions.clone(),
            logger: logger.clone(),
        });
        let get_panels_use_case = Arc::new(GetPanelsUseCaseImpl {
            sessions: sessions.clone(),
        });
        let update_panel_use_case = Arc::new(UpdatePanelUseCaseImpl {
            sessions: sessions.clone(),
            logger: logger.clone(),
        });

        // Checkout
        let get_order_use_case = Arc::new(GetOrderUseCaseImpl {
            checkout: checkout.clone(),
            logger: logger.clone(),
        });
        let checkout_use_case = Arc::new(CheckoutUseCaseImpl {
            sessions: sessions.clone(),
            checkout,
            logger,
        });

        let health_api = crate::api::health::routes::Api::new(sessions.clone());
        let cart_api = crate::api::cart::routes::CartApi::new(
            get_cart_use_case.clone(),
            add_item_use_case,
            set_quantity_use_case,
            remove_item_use_case,
            clear_use_case,
        );
        let wishlist_api = crate::api::wishlist::routes::WishlistApi::new(
            get_cart_use_case,
            toggle_wishlist_use_case,
        );
        let panel_api =
            crate::api::panel::routes::PanelApi::new(get_panels_use_case, update_panel_use_case);
        let checkout_api = crate::api::checkout::routes::CheckoutApi::new(checkout_use_case, get_order_use_case);

        Self {
            health_api,
            cart_api,
            wishlist_api,
            panel_api,
            checkout_api,
            sessions,
        }
    }
}
