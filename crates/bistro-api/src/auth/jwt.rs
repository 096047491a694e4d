// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT token management.

use std::sync::Arc;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, TokenData,
    Validation,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Claims;
use crate::error::{ApiError, ApiResult};

/// Lifetime of every issued token.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

// =============================================================================
// JwtConfig
// =============================================================================

/// JWT configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    #[serde(skip_serializing)]
    pub secret: String,
}

impl JwtConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.is_empty() {
            return Err(ApiError::internal("token secret is not configured"));
        }
        if self.secret.len() < 32 {
            tracing::warn!("Token secret is shorter than recommended (32 bytes)");
        }
        Ok(())
    }
}

// =============================================================================
// JwtManager
// =============================================================================

/// Issues and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl JwtManager {
    /// Creates a new JWT manager. Fails if the secret is empty.
    pub fn new(config: JwtConfig) -> ApiResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Tokens die exactly at `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Issues a token for an arbitrary payload, valid for one hour.
    pub fn issue_token(&self, payload: Map<String, Value>) -> ApiResult<String> {
        self.create_token(&Claims::new(payload, TOKEN_LIFETIME_SECS))
    }

    /// Signs the given claims.
    pub fn create_token(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))
    }

    /// Validates and decodes a token.
    pub fn validate_token(&self, token: &str) -> ApiResult<TokenData<Claims>> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::unauthorized("Token has expired"),
                ErrorKind::InvalidToken => ApiError::unauthorized("Invalid token format"),
                ErrorKind::InvalidSignature => ApiError::unauthorized("Invalid token signature"),
                _ => ApiError::unauthorized(format!("Token validation failed: {}", e)),
            }
        })
    }
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("algorithm", &Algorithm::HS256)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_manager() -> JwtManager {
        JwtManager::new(JwtConfig::new("test-secret-key-that-is-long-enough-for-testing")).unwrap()
    }

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_issue_and_validate_token() {
        let manager = test_manager();

        let token = manager
            .issue_token(payload(json!({ "email": "a@x.com", "name": "Ann" })))
            .unwrap();
        let claims = manager.validate_token(&token).unwrap().claims;

        assert_eq!(claims.email(), Some("a@x.com"));
        assert_eq!(claims.get("name"), Some(&json!("Ann")));
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_expired_token() {
        let manager = test_manager();

        let mut claims = Claims::new(payload(json!({ "email": "a@x.com" })), 0);
        claims.iat -= TOKEN_LIFETIME_SECS + 1;
        claims.exp = claims.iat + TOKEN_LIFETIME_SECS;
        let token = manager.create_token(&claims).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
    }

    #[test]
    fn test_no_clock_skew_tolerance() {
        let manager = test_manager();

        // Inside jsonwebtoken's default 60 s leeway.
        let mut claims = Claims::new(payload(json!({ "email": "a@x.com" })), 0);
        claims.iat -= TOKEN_LIFETIME_SECS + 30;
        claims.exp = claims.iat + TOKEN_LIFETIME_SECS;
        let token = manager.create_token(&claims).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
    }

    #[test]
    fn test_invalid_token() {
        let manager = test_manager();
        assert!(manager.validate_token("invalid.token.here").is_err());
        assert!(manager.validate_token("").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let manager1 = JwtManager::new(JwtConfig::new("secret-one-for-testing-purposes")).unwrap();
        let manager2 = JwtManager::new(JwtConfig::new("secret-two-for-testing-purposes")).unwrap();

        let token = manager1.issue_token(Map::new()).unwrap();
        assert!(manager2.validate_token(&token).is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = JwtManager::new(JwtConfig::new("")).unwrap_err();
        assert!(matches!(err, ApiError::Internal { .. }));
    }
}
