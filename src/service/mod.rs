pub mod user_service;
pub mod product_service;
