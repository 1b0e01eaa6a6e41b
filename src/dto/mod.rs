pub mod product_dto;
