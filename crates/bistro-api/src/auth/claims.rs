// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT claims structure.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names owned by the issuer. Callers cannot set them.
const RESERVED_CLAIMS: [&str; 2] = ["exp", "iat"];

/// JWT claims for authentication.
///
/// The caller-supplied payload is carried as-is next to the registered
/// `exp` and `iat` claims. Only `email` is interpreted by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Caller-supplied claims.
    #[serde(flatten)]
    pub payload: Map<String, Value>,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at time (Unix timestamp).
    pub iat: i64,
}

impl Claims {
    /// Creates claims from a payload, expiring `expires_in_secs` from now.
    ///
    /// Any `exp` or `iat` keys in the payload are discarded.
    pub fn new(mut payload: Map<String, Value>, expires_in_secs: i64) -> Self {
        for key in RESERVED_CLAIMS {
            payload.remove(key);
        }

        let now = Utc::now().timestamp();
        Self {
            payload,
            exp: now + expires_in_secs,
            iat: now,
        }
    }

    /// Returns the caller's email, if the payload carries one.
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }

    /// Returns a payload claim.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(payload(json!({ "email": "a@x.com" })), 3600);

        assert_eq!(claims.email(), Some("a@x.com"));
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_reserved_claims_are_replaced() {
        let claims = Claims::new(
            payload(json!({ "email": "a@x.com", "exp": 9999999999i64, "iat": 1 })),
            3600,
        );

        assert!(claims.get("exp").is_none());
        assert!(claims.iat > 1);
        assert!(claims.exp < 9999999999);
        assert_eq!(claims.email(), Some("a@x.com"));
    }

    #[test]
    fn test_flattened_wire_format() {
        let claims = Claims::new(payload(json!({ "email": "a@x.com", "plan": 2 })), 60);
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["plan"], 2);
        assert_eq!(value["exp"], claims.exp);

        let back: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn test_missing_email() {
        let claims = Claims::new(payload(json!({ "email": 42 })), 60);
        assert!(claims.email().is_none());
        assert!(Claims::new(Map::new(), 60).email().is_none());
    }
}
