use bazaar_backend::dto::product_dto::{CreateProductRequest, UpdateProductRequest};
use validator::Validate;

fn valid_create() -> CreateProductRequest {
    serde_json::from_value(serde_json::json!({
        "name": "Widget",
        "description": "A fine widget",
        "imageUrl": "https://example.com/widget.png",
        "stock": 5,
        "price": 9.99
    }))
    .unwrap()
}

#[test]
fn test_create_request_valid() {
    let req = valid_create();
    assert!(req.validate().is_ok());
    assert_eq!(req.rating, None);
}

#[test]
fn test_create_request_negative_stock() {
    let mut req = valid_create();
    req.stock = -1;
    assert!(req.validate().is_err());
}

#[test]
fn test_create_request_negative_price() {
    let mut req = valid_create();
    req.price = -0.01;
    assert!(req.validate().is_err());
}

#[test]
fn test_create_request_rating_out_of_range() {
    let mut req = valid_create();
    req.rating = Some(5.5);
    assert!(req.validate().is_err());

    req.rating = Some(-1.0);
    assert!(req.validate().is_err());

    req.rating = Some(5.0);
    assert!(req.validate().is_ok());
}

#[test]
fn test_create_request_image_url_wire_name() {
    // The wire format uses camelCase
    let req = valid_create();
    assert_eq!(req.image_url, "https://example.com/widget.png");

    let missing: Result<CreateProductRequest, _> = serde_json::from_value(serde_json::json!({
        "name": "Widget",
        "description": "A fine widget",
        "image_url": "https://example.com/widget.png",
        "stock": 5,
        "price": 9.99
    }));
    assert!(missing.is_err());
}

#[test]
fn test_update_request_requires_complete_field_set() {
    // Whole-field-set update: a partial body does not deserialize
    let partial: Result<UpdateProductRequest, _> = serde_json::from_value(serde_json::json!({
        "name": "Widget v2"
    }));
    assert!(partial.is_err());

    let full: UpdateProductRequest = serde_json::from_value(serde_json::json!({
        "name": "Widget v2",
        "description": "Improved",
        "imageUrl": "https://example.com/widget2.png",
        "stock": 3,
        "price": 12.5,
        "rating": 4.0
    }))
    .unwrap();
    assert!(full.validate().is_ok());
}
