pub mod device;
pub mod error;
pub mod tags;
pub mod cart {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
pub mod checkout {
    pub mod dto;
    pub mod routes;
}
pub mod health {
    pub mod routes;
}
pub mod panel {
    pub mod dto;
    pub mod routes;
}
pub mod wishlist {
    pub mod dto;
    pub mod routes;
}
