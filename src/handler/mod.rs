pub mod user_handler;
pub mod product_handler;
