//! Token codec: signed, time-limited identity claims
//!
//! Tokens are stateless; validity is determined solely by the HMAC
//! signature and the embedded expiry at verification time.

use crate::{config::AppConfig, error::AppError, models::user::{Role, User}};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Identity claim carried inside a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (numeric user id, stringified per JWT convention)
    pub sub: String,

    pub email: String,

    pub name: String,

    /// Closed role enum; a token carrying any other value fails to decode
    pub role: Role,

    /// Issued at (unix seconds)
    pub iat: i64,

    /// Expiration (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into the numeric user id
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

/// Token issue/verify service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: u64,
}

impl JwtService {
    /// Build the service from configuration.
    ///
    /// The secret is checked here, at the construction boundary; an absent
    /// or weak secret never produces a signer that issues invalid tokens.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256 wants at least 32 bytes of key material
        if secret.len() < 32 {
            return Err(AppError::Config(
                "JWT secret too short (min 32 chars)".to_string(),
            ));
        }

        Ok(Self::new(secret, config.security.token_ttl_secs))
    }

    /// Build the service from raw parts (used by tests with fake secrets)
    pub fn new(secret: &str, token_ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_secs,
        }
    }

    /// Token lifetime in seconds, fixed at issuance
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs
    }

    /// Issue a signed token embedding the user's full identity claim
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.token_ttl_secs as i64);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Verify a token and reconstruct its claim.
    ///
    /// Expired tokens are distinguished from every other rejection; both
    /// resolve to a 401 but the split is useful client UX. The precise
    /// rejection reason stays in the debug log.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token rejected: expired");
                    AppError::TokenExpired
                }
                kind => {
                    tracing::debug!(?kind, "Token rejected");
                    AppError::Unauthorized
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

    fn test_user(role: Role) -> User {
        User {
            id: 42,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = JwtService::new(TEST_SECRET, 3600);
        let user = test_user(Role::Student);

        let token = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.role, Role::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_with_wrong_secret_fails() {
        let issuer = JwtService::new(TEST_SECRET, 3600);
        let verifier = JwtService::new("another-secret-key-also-32-chars-long!", 3600);

        let token = issuer.issue_token(&test_user(Role::Admin)).unwrap();
        assert!(matches!(
            verifier.verify_token(&token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_verify_garbage_token_fails() {
        let service = JwtService::new(TEST_SECRET, 3600);
        assert!(matches!(
            service.verify_token("not-a-token"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_from_config_rejects_short_secret() {
        let config = crate::config::AppConfig {
            server: crate::config::ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: crate::config::DatabaseConfig {
                url: secrecy::Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: crate::config::LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: crate::config::SecurityConfig {
                jwt_secret: secrecy::Secret::new("short".to_string()),
                token_ttl_secs: 3600,
            },
        };

        assert!(matches!(
            JwtService::from_config(&config),
            Err(AppError::Config(_))
        ));
    }
}
