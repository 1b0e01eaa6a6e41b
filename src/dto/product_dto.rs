use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body for POST /products. `rating` is optional and defaults to 0; the
/// review list always starts empty.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    #[serde(rename = "imageUrl")]
    #[validate(length(min = 1, max = 2000))]
    pub image_url: String,

    #[validate(range(min = 0))]
    pub stock: i64,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

/// Body for PUT /products/{id}. Update is whole-field-set: every scalar
/// field must be supplied and exactly those are replaced. The embedded
/// review list cannot be written through update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    #[serde(rename = "imageUrl")]
    #[validate(length(min = 1, max = 2000))]
    pub image_url: String,

    #[validate(range(min = 0))]
    pub stock: i64,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
}

/// Body for POST /products/{id}/reviews. The field is optional so that an
/// absent `review` answers 400 with the usual message instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddReviewRequest {
    pub review: Option<String>,
}
