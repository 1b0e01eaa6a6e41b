use bazaar_backend::config::JwtConfig;
use bazaar_backend::model::user::Role;
use bazaar_backend::util::jwt::*;
use chrono::Utc;

// Helper function to create JWT utils for testing
fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

// Test user data
struct TestUser {
    id: String,
    username: String,
    email: String,
    role: Role,
}

impl TestUser {
    fn new_normal() -> Self {
        Self {
            id: "64b0c8f2a1b2c3d4e5f60718".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Normal,
        }
    }

    fn new_admin() -> Self {
        Self {
            id: "64b0c8f2a1b2c3d4e5f60719".to_string(),
            username: "root".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        }
    }
}

#[test]
fn test_generate_access_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_normal();

    let token = jwt_utils
        .generate_access_token(&user.id, &user.username, &user.email, user.role)
        .unwrap();
    assert!(!token.is_empty());

    let claims = jwt_utils.validate_access_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, user.username);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, Role::Normal);
    assert!(!claims.jti.is_empty());
}

#[test]
fn test_token_expiry_is_one_hour() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_admin();

    let before = Utc::now().timestamp();
    let token = jwt_utils
        .generate_access_token(&user.id, &user.username, &user.email, user.role)
        .unwrap();
    let after = Utc::now().timestamp();

    let claims = jwt_utils.validate_access_token(&token).unwrap();
    assert_eq!(claims.exp - claims.iat, 60 * 60);
    assert!(claims.iat >= before && claims.iat <= after);
}

#[test]
fn test_validate_expired_token() {
    // A negative expiry puts exp in the past at issue time
    let config = JwtConfig {
        access_token_expiration: -120,
        ..JwtConfig::default()
    };
    let jwt_utils = JwtTokenUtilsImpl::new(config);
    let user = TestUser::new_normal();

    let token = jwt_utils
        .generate_access_token(&user.id, &user.username, &user.email, user.role)
        .unwrap();
    let result = jwt_utils.validate_access_token(&token);
    assert!(matches!(result, Err(JwtError::TokenExpired)));
}

#[test]
fn test_validate_token_wrong_secret() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_normal();
    let token = jwt_utils
        .generate_access_token(&user.id, &user.username, &user.email, user.role)
        .unwrap();

    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "a_completely_different_secret_for_signing".to_string(),
        ..JwtConfig::default()
    });
    let result = other.validate_access_token(&token);
    assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
}

#[test]
fn test_validate_tampered_token() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_normal();
    let mut token = jwt_utils
        .generate_access_token(&user.id, &user.username, &user.email, user.role)
        .unwrap();

    // Flip a character in the payload segment
    let mid = token.len() / 2;
    let replacement = if token.as_bytes()[mid] == b'a' { 'b' } else { 'a' };
    token.replace_range(mid..mid + 1, &replacement.to_string());

    assert!(jwt_utils.validate_access_token(&token).is_err());
}

#[test]
fn test_validate_garbage_token() {
    let jwt_utils = create_test_jwt_utils();
    let result = jwt_utils.validate_access_token("not.a.jwt");
    assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
}

#[test]
fn test_admin_role_round_trips() {
    let jwt_utils = create_test_jwt_utils();
    let admin = TestUser::new_admin();
    let token = jwt_utils
        .generate_access_token(&admin.id, &admin.username, &admin.email, admin.role)
        .unwrap();
    let claims = jwt_utils.validate_access_token(&token).unwrap();
    assert_eq!(claims.role, Role::Admin);
}

#[test]
fn test_extract_token_from_header_success() {
    let jwt_utils = create_test_jwt_utils();
    let token = jwt_utils.extract_token_from_header("Bearer abc.def.ghi");
    assert_eq!(token.unwrap(), "abc.def.ghi");
}

#[test]
fn test_extract_token_from_header_missing_bearer() {
    let jwt_utils = create_test_jwt_utils();
    assert!(jwt_utils.extract_token_from_header("abc.def.ghi").is_err());
    assert!(jwt_utils.extract_token_from_header("Basic abc").is_err());
}

#[test]
fn test_extract_token_from_header_empty_token() {
    let jwt_utils = create_test_jwt_utils();
    assert!(jwt_utils.extract_token_from_header("Bearer ").is_err());
}

#[test]
fn test_unique_jti_per_token() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_normal();
    let t1 = jwt_utils
        .generate_access_token(&user.id, &user.username, &user.email, user.role)
        .unwrap();
    let t2 = jwt_utils
        .generate_access_token(&user.id, &user.username, &user.email, user.role)
        .unwrap();
    let c1 = jwt_utils.validate_access_token(&t1).unwrap();
    let c2 = jwt_utils.validate_access_token(&t2).unwrap();
    assert_ne!(c1.jti, c2.jti);
}
