use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::model::user::{Role, User};
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a user with a hashed password. Returns no token; the caller
    /// logs in separately.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<(), ServiceError>;

    /// Verifies credentials and issues a signed access token.
    async fn login(&self, email: &str, password: &str) -> Result<String, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<MongoUserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<MongoUserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self {
            user_repo,
            jwt_utils,
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, password), fields(username = %username, email = %email))]
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<(), ServiceError> {
        info!("Registering new user");

        let existing = self
            .user_repo
            .find_by_email_or_username(email, username)
            .await?;
        if existing.is_some() {
            error!("Registration rejected, user already exists");
            return Err(ServiceError::Conflict("User already exists".to_string()));
        }

        let hash = PasswordUtilsImpl::hash_password(password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash,
            role,
            created_at: None,
        };

        // The existence check above can race with a concurrent registration;
        // the unique indexes turn that race into AlreadyExists.
        self.user_repo.insert(user).await.map_err(|e| match e {
            RepositoryError::AlreadyExists(_) => {
                ServiceError::Conflict("User already exists".to_string())
            }
            other => ServiceError::from(other),
        })?;

        info!("User registered successfully");
        Ok(())
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: &str, password: &str) -> Result<String, ServiceError> {
        info!("User login attempt");

        let user = self.user_repo.find_by_email(email).await?;
        // Unknown email and wrong password answer identically.
        let user = match user {
            Some(u) => u,
            None => {
                error!("Login failed, user not found");
                return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
            }
        };

        let valid = PasswordUtilsImpl::verify_password(password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            error!("Login failed, invalid credentials");
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        let user_id = user
            .id
            .as_ref()
            .map(|id| id.to_hex())
            .unwrap_or_default();
        let token = self
            .jwt_utils
            .generate_access_token(&user_id, &user.username, &user.email, user.role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        info!("User logged in successfully");
        Ok(token)
    }
}
