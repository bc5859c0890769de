pub mod application {
    pub mod cart {
        pub mod add_item;
        pub mod checkout;
        pub mod clear;
        pub mod events;
        pub mod get_cart;
        pub mod panel;
        pub mod persistence;
        pub mod remove_item;
        pub mod session;
        pub mod set_quantity;
        pub mod store;
        #[cfg(test)]
        pub(crate) mod test_support;
        pub mod toggle_wishlist;
        pub mod update_panel;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod cart {
        pub mod errors;
        pub mod events;
        pub mod model;
        pub mod persisted;
        pub mod repository;
        pub mod services;
        pub mod use_cases {
            pub mod add_item;
            pub mod checkout;
            pub mod clear;
            pub mod get_cart;
            pub mod panel;
            pub mod remove_item;
            pub mod set_quantity;
            pub mod toggle_wishlist;
        }
    }
    pub mod shared {
        pub mod value_objects;
    }
}
