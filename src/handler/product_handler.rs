use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bson::oid::ObjectId;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::dto::product_dto::{AddReviewRequest, CreateProductRequest, UpdateProductRequest};
use crate::service::product_service::{ProductService, ProductServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::jwt::Claims;

// An id that does not parse cannot resolve to a product, so it gets the
// same 404 as an unknown one.
fn parse_product_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id)
        .map_err(|_| HandlerError::new(HandlerErrorKind::NotFound, "Product not found"))
}

fn reject_body(err: JsonRejection) -> HandlerError {
    HandlerError::new(
        HandlerErrorKind::BadRequest,
        format!("Invalid request body: {}", err.body_text()),
    )
}

// Handler: Create Product (admin only)
pub async fn create_product_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload.map_err(reject_body)?;
    if let Err(e) = payload.validate() {
        return Err(HandlerError::new(
            HandlerErrorKind::Validation,
            format!("Validation error: {}", e),
        ));
    }
    let created = service.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// Handler: List Products (public)
pub async fn list_products_handler(
    State(service): State<Arc<ProductServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

// Handler: Get Product (public)
pub async fn get_product_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_product_id(&id)?;
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

// Handler: Update Product (admin only)
pub async fn update_product_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    Path((id,)): Path<(String,)>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_product_id(&id)?;
    let Json(payload) = payload.map_err(reject_body)?;
    if let Err(e) = payload.validate() {
        return Err(HandlerError::new(
            HandlerErrorKind::Validation,
            format!("Validation error: {}", e),
        ));
    }
    let updated = service.update_product(id, payload).await?;
    Ok(Json(updated))
}

// Handler: Delete Product (admin only)
pub async fn delete_product_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_product_id(&id)?;
    service.delete_product(id).await?;
    Ok(Json(json!({ "message": "Product deleted" })))
}

// Handler: Add Review (any authenticated user)
pub async fn add_review_handler(
    State(service): State<Arc<ProductServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<AddReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_product_id(&id)?;
    let Json(payload) = payload.map_err(reject_body)?;
    let review = payload
        .review
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| HandlerError::new(HandlerErrorKind::Validation, "Review is required"))?;

    // The reviewer's name comes from the verified claims, never the body.
    service.add_review(id, &claims.username, review).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Review added" })),
    ))
}
