use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceExt; // for .oneshot()

use bazaar_backend::config::JwtConfig;
use bazaar_backend::middlewares::auth_middleware::{require_admin, require_auth, AuthState};
use bazaar_backend::model::user::Role;
use bazaar_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

fn test_state() -> (Arc<AuthState>, Arc<JwtTokenUtilsImpl>) {
    let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));
    let state = Arc::new(AuthState {
        jwt_utils: jwt_utils.clone(),
    });
    (state, jwt_utils)
}

// A router shaped like the product router: one authenticated route, one
// admin route, gates applied the same way.
fn test_router(state: Arc<AuthState>) -> Router {
    let authed = Router::new()
        .route("/secure", get(|| async { "secure" }))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin = Router::new()
        .route("/admin", get(|| async { "admin" }))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    authed.merge(admin)
}

fn token_for(jwt_utils: &JwtTokenUtilsImpl, role: Role) -> String {
    jwt_utils
        .generate_access_token("64b0c8f2a1b2c3d4e5f60718", "alice", "alice@example.com", role)
        .unwrap()
}

async fn body_message(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    json["message"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_missing_token_is_access_denied() {
    let (state, _) = test_state();
    let app = test_router(state);

    let req = Request::builder()
        .uri("/secure")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_message(resp).await, "Access denied");
}

#[tokio::test]
async fn test_garbage_token_is_invalid() {
    let (state, _) = test_state();
    let app = test_router(state);

    let req = Request::builder()
        .uri("/secure")
        .header("authorization", "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_message(resp).await, "Invalid token");
}

#[tokio::test]
async fn test_expired_token_is_invalid() {
    let (state, _) = test_state();
    let expired_utils = JwtTokenUtilsImpl::new(JwtConfig {
        access_token_expiration: -120,
        ..JwtConfig::default()
    });
    let token = token_for(&expired_utils, Role::Normal);
    let app = test_router(state);

    let req = Request::builder()
        .uri("/secure")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_message(resp).await, "Invalid token");
}

#[tokio::test]
async fn test_valid_token_passes_auth() {
    let (state, jwt_utils) = test_state();
    let token = token_for(&jwt_utils, Role::Normal);
    let app = test_router(state);

    let req = Request::builder()
        .uri("/secure")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_normal_role_is_forbidden_on_admin_route() {
    let (state, jwt_utils) = test_state();
    let token = token_for(&jwt_utils, Role::Normal);
    let app = test_router(state);

    let req = Request::builder()
        .uri("/admin")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_message(resp).await, "Admin access required");
}

#[tokio::test]
async fn test_admin_role_passes_admin_route() {
    let (state, jwt_utils) = test_state();
    let token = token_for(&jwt_utils, Role::Admin);
    let app = test_router(state);

    let req = Request::builder()
        .uri("/admin")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_gate_without_auth_gate_rejects() {
    // require_admin alone never sees claims, so it must refuse
    let app = Router::new()
        .route("/broken", get(|| async { "unreachable" }))
        .route_layer(middleware::from_fn(require_admin));

    let req = Request::builder()
        .uri("/broken")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
