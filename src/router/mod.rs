pub mod user_router;
pub mod product_router;
