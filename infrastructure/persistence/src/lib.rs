pub mod db;
pub mod catalog {
    pub mod entity;
    pub mod repository;
}
pub mod order {
    pub mod entity;
    pub mod repository;
}
pub mod snapshot {
    pub mod entity;
    pub mod repository;
}
