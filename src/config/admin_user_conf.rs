use serde::{Deserialize, Serialize};
use std::env;

use crate::config::ConfigError;

/// Credentials for the bootstrap admin account, created at startup when all
/// three variables are present and no such user exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AdminUserConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(AdminUserConfig {
            username: env::var("ADMIN_USERNAME")
                .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_USERNAME".to_string()))?,
            email: env::var("ADMIN_EMAIL")
                .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_EMAIL".to_string()))?,
            password: env::var("ADMIN_PASSWORD")
                .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_PASSWORD".to_string()))?,
        })
    }
}
