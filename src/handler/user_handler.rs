use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::model::user::Role;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

// Fields are optional so that an incomplete body answers 400 with the
// usual message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// Register
pub async fn register_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (username, email, password, role) = match (
        present(&payload.username),
        present(&payload.email),
        present(&payload.password),
        present(&payload.role),
    ) {
        (Some(u), Some(e), Some(p), Some(r)) => (u, e, p, r),
        _ => {
            return Err(HandlerError::new(
                HandlerErrorKind::Validation,
                "All fields are required",
            ))
        }
    };

    let role = Role::parse(role).ok_or_else(|| {
        HandlerError::new(HandlerErrorKind::Validation, "Role must be admin or normal")
    })?;

    service.register(username, email, password, role).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (email, password) = match (present(&payload.email), present(&payload.password)) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            return Err(HandlerError::new(
                HandlerErrorKind::Validation,
                "Email and password are required",
            ))
        }
    };

    let token = service.login(email, password).await?;

    Ok(Json(LoginResponse {
        access_token: token,
    }))
}
