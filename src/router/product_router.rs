use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::product_handler::{
    add_review_handler, create_product_handler, delete_product_handler, get_product_handler,
    list_products_handler, update_product_handler,
};
use crate::middlewares::auth_middleware::{require_admin, require_auth, AuthState};
use crate::service::product_service::ProductServiceImpl;

pub fn product_router(service: Arc<ProductServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Public browse routes
    let public = Router::new()
        .route("/products", get(list_products_handler))
        .route("/products/{id}", get(get_product_handler));

    // Any authenticated user may post a review
    let authed = Router::new()
        .route("/products/{id}/reviews", post(add_review_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth,
        ));

    // Admin-only CRUD. Layers run outermost-first, so require_auth is added
    // last: it must run before require_admin to place the claims.
    let admin = Router::new()
        .route("/products", post(create_product_handler))
        .route("/products/{id}", put(update_product_handler))
        .route("/products/{id}", delete(delete_product_handler))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    public.merge(authed).merge(admin).with_state(service)
}
