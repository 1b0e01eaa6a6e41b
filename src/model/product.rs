use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A review embedded inside a product. Append-only; it has no identity or
/// lifecycle of its own and is removed with its parent product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    pub review: String,
}

/// A catalog product with its embedded review list.
///
/// Field names mirror the wire format, hence the camelCase exception.
/// `rating` is stored as supplied by the admin, it is not derived from
/// the review list.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    pub imageUrl: String,
    pub stock: i64,
    pub price: f64,
    pub rating: f64,
    pub reviews: Vec<Review>,
    pub createdAt: Option<String>,
    pub updatedAt: Option<String>,
}
