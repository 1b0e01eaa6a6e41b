use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::product_dto::{CreateProductRequest, UpdateProductRequest};
use crate::model::product::Product;
use crate::repository::product_repo::{MongoProductRepository, ProductFields, ProductRepository};
use crate::repository::repository_error::RepositoryError;
use crate::util::error::ServiceError;

#[async_trait]
pub trait ProductService: Send + Sync {
    async fn create_product(&self, req: CreateProductRequest) -> Result<Product, ServiceError>;
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_product(&self, id: ObjectId) -> Result<Product, ServiceError>;
    async fn update_product(
        &self,
        id: ObjectId,
        req: UpdateProductRequest,
    ) -> Result<Product, ServiceError>;
    async fn delete_product(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn add_review(
        &self,
        id: ObjectId,
        username: &str,
        review: &str,
    ) -> Result<(), ServiceError>;
}

pub struct ProductServiceImpl {
    pub product_repo: Arc<MongoProductRepository>,
}

impl ProductServiceImpl {
    pub fn new(product_repo: Arc<MongoProductRepository>) -> Self {
        Self { product_repo }
    }
}

// Repository NotFound carries storage detail; the API always says the same
// thing about a missing product.
fn map_not_found(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound(_) => ServiceError::NotFound("Product not found".to_string()),
        other => ServiceError::from(other),
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    #[instrument(skip(self, req), fields(name = %req.name))]
    async fn create_product(&self, req: CreateProductRequest) -> Result<Product, ServiceError> {
        info!("Creating product");
        let product = Product {
            id: None,
            name: req.name,
            description: req.description,
            imageUrl: req.image_url,
            stock: req.stock,
            price: req.price,
            rating: req.rating.unwrap_or(0.0),
            reviews: Vec::new(),
            createdAt: None,
            updatedAt: None,
        };
        let res = self.product_repo.create(product).await;
        match &res {
            Ok(_) => info!("Product created successfully"),
            Err(e) => error!("Failed to create product: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        info!("Listing products");
        let res = self.product_repo.list().await;
        match &res {
            Ok(products) => info!("Fetched {} products", products.len()),
            Err(e) => error!("Failed to list products: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_product(&self, id: ObjectId) -> Result<Product, ServiceError> {
        info!("Getting product by id");
        let res = self.product_repo.get_by_id(id).await;
        match &res {
            Ok(_) => info!("Product fetched successfully"),
            Err(e) => error!("Failed to fetch product: {e}"),
        }
        res.map_err(map_not_found)
    }

    #[instrument(skip(self, req), fields(id = %id))]
    async fn update_product(
        &self,
        id: ObjectId,
        req: UpdateProductRequest,
    ) -> Result<Product, ServiceError> {
        info!("Updating product");
        let fields = ProductFields {
            name: req.name,
            description: req.description,
            image_url: req.image_url,
            stock: req.stock,
            price: req.price,
            rating: req.rating,
        };
        let res = self.product_repo.update_fields(id, fields).await;
        match &res {
            Ok(_) => info!("Product updated successfully"),
            Err(e) => error!("Failed to update product: {e}"),
        }
        res.map_err(map_not_found)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_product(&self, id: ObjectId) -> Result<(), ServiceError> {
        info!("Deleting product");
        let res = self.product_repo.delete(id).await;
        match &res {
            Ok(_) => info!("Product deleted successfully"),
            Err(e) => error!("Failed to delete product: {e}"),
        }
        res.map_err(map_not_found)
    }

    #[instrument(skip(self, review), fields(id = %id, username = %username))]
    async fn add_review(
        &self,
        id: ObjectId,
        username: &str,
        review: &str,
    ) -> Result<(), ServiceError> {
        info!("Adding review to product");
        if review.trim().is_empty() {
            return Err(ServiceError::InvalidInput("Review is required".to_string()));
        }
        let res = self.product_repo.push_review(id, username, review).await;
        match &res {
            Ok(_) => info!("Review added successfully"),
            Err(e) => error!("Failed to add review: {e}"),
        }
        res.map_err(map_not_found)
    }
}
