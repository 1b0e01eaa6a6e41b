use axum::{
    body::Body, extract::State, http::Request, middleware::Next, response::Response,
};
use std::sync::Arc;

use crate::model::user::Role;
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::jwt::{Claims, JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Authentication gate. Rejects requests without a valid bearer token and
/// attaches the decoded claims to the request extensions for downstream
/// handlers and gates. No other side effects.
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    let auth_header = match auth_header {
        Some(h) => h,
        None => {
            return Err(HandlerError::new(
                HandlerErrorKind::Unauthorized,
                "Access denied",
            ))
        }
    };

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| HandlerError::new(HandlerErrorKind::Unauthorized, "Invalid token"))?;
    let claims = state
        .jwt_utils
        .validate_access_token(&token)
        .map_err(|_| HandlerError::new(HandlerErrorKind::Unauthorized, "Invalid token"))?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Admin gate. Must run after `require_auth`, which is what placed the
/// claims in the extensions.
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, HandlerError> {
    let claims = req.extensions().get::<Claims>();

    match claims {
        Some(claims) if claims.role == Role::Admin => Ok(next.run(req).await),
        Some(_) => Err(HandlerError::new(
            HandlerErrorKind::Forbidden,
            "Admin access required",
        )),
        // No claims means the auth gate did not run; treat as unauthenticated.
        None => Err(HandlerError::new(
            HandlerErrorKind::Unauthorized,
            "Access denied",
        )),
    }
}
