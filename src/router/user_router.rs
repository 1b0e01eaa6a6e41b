use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handler::user_handler::{login_handler, register_handler};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    // Both routes are public; registration returns no token and login is
    // the only way to obtain one.
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .with_state(service)
}
