use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Fallback signing key used when JWT_SECRET is unset. Keeps local bring-up
/// zero-config; any real deployment must set JWT_SECRET.
pub const INSECURE_DEFAULT_SECRET: &str = "your_jwt_secret";

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// Access token expiration time in minutes
    pub access_token_expiration: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (falls back to an
    ///   insecure built-in default when unset)
    /// - JWT_ACCESS_TOKEN_EXPIRY: Access token expiration in minutes
    ///   (defaults to 60 = 1 hour)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, falling back to the insecure default secret");
            INSECURE_DEFAULT_SECRET.to_string()
        });
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let access_token_expiration = env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<i64>()
            .map_err(|e| {
                error!("Invalid JWT_ACCESS_TOKEN_EXPIRY value: {}", e);
                ConfigError::InvalidValue(format!("JWT_ACCESS_TOKEN_EXPIRY: {}", e))
            })?;

        let config = JwtConfig {
            jwt_secret,
            access_token_expiration,
        };
        config.validate()?;

        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            error!("JWT secret cannot be empty");
            return Err(ConfigError::ValidationError(
                "JWT secret cannot be empty".to_string(),
            ));
        }

        if self.access_token_expiration <= 0 {
            error!("Access token expiration must be greater than 0");
            return Err(ConfigError::ValidationError(
                "Access token expiration must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration used by unit and integration tests
impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough".to_string(),
            access_token_expiration: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = JwtConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.access_token_expiration, 60);
    }

    #[test]
    fn test_validate_empty_secret() {
        let mut config = JwtConfig::default();
        config.jwt_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_positive_expiry() {
        let mut config = JwtConfig::default();
        config.access_token_expiration = 0;
        assert!(config.validate().is_err());
    }
}
