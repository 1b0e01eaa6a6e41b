pub mod user;
pub mod product;
