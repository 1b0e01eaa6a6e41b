use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info};

use crate::model::product::Product;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// The scalar fields an admin may change on a product. Reviews and the id
/// are deliberately absent: reviews only grow through `push_review`.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub stock: i64,
    pub price: f64,
    pub rating: f64,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> RepositoryResult<Product>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Product>;
    async fn update_fields(&self, id: ObjectId, fields: ProductFields) -> RepositoryResult<Product>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self) -> RepositoryResult<Vec<Product>>;
    async fn push_review(&self, id: ObjectId, user: &str, review: &str) -> RepositoryResult<()>;
}

pub struct MongoProductRepository {
    collection: mongodb::Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        let collection = db.collection::<Product>("products");
        MongoProductRepository { collection }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[tracing::instrument(skip(self, product), fields(name = %product.name))]
    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        let mut new_product = product;
        new_product.id = Some(ObjectId::new());
        let time = chrono::Utc::now().to_rfc3339();
        new_product.createdAt = Some(time.clone());
        new_product.updatedAt = Some(time);

        let result = self.collection.insert_one(new_product.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Product created successfully");
                Ok(new_product)
            }
            Err(e) => {
                error!("Failed to create product: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create product: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Product> {
        let filter = doc! { "_id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(RepositoryError::not_found(format!(
                "Product not found for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to fetch product by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch product by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, fields), fields(id = %id))]
    async fn update_fields(&self, id: ObjectId, fields: ProductFields) -> RepositoryResult<Product> {
        let filter = doc! { "_id": id };
        // $set of the named scalar fields only; the embedded review list is
        // never written through this path.
        let update = doc! { "$set": {
            "name": &fields.name,
            "description": &fields.description,
            "imageUrl": &fields.image_url,
            "stock": fields.stock,
            "price": fields.price,
            "rating": fields.rating,
            "updatedAt": chrono::Utc::now().to_rfc3339(),
        }};
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            // matched_count, not modified_count: setting the same values
            // again is still a successful update.
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Product updated successfully for ID: {}", id);
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No product found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No product found to update for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to update product: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update product: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        let result = self.collection.delete_one(filter, None).await;
        match result {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("Product deleted successfully for ID: {}", id);
                Ok(())
            }
            Ok(_) => {
                error!("No product found to delete for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No product found to delete for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to delete product: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to delete product: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Product>> {
        // Storage-native order; creation order is not guaranteed.
        let cursor = self.collection.find(None, None).await;
        match cursor {
            Ok(mut cursor) => {
                let mut products = Vec::new();
                while let Some(product) = cursor.next().await {
                    match product {
                        Ok(p) => products.push(p),
                        Err(e) => {
                            error!("Failed to deserialize product: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize product: {}",
                                e
                            )));
                        }
                    }
                }
                info!("Fetched {} products", products.len());
                Ok(products)
            }
            Err(e) => {
                error!("Failed to list products: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to list products: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, review), fields(id = %id, user = %user))]
    async fn push_review(&self, id: ObjectId, user: &str, review: &str) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        // Atomic single-document append. A read-modify-write here would lose
        // reviews under concurrent writers; $push cannot.
        let update = doc! { "$push": { "reviews": { "user": user, "review": review } } };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Review appended for product ID: {}", id);
                Ok(())
            }
            Ok(_) => {
                error!("No product found to review for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No product found to review for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to append review: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to append review: {}",
                    e
                )))
            }
        }
    }
}
