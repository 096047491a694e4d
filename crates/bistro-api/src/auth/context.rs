// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication context.

use std::net::IpAddr;

use uuid::Uuid;

use super::Claims;

/// Authentication context for a request.
///
/// Attached to the request extensions by the authentication middleware and
/// read by the admin gate and handlers. Never persisted.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Decoded token claims.
    pub claims: Claims,
    /// Client IP address.
    pub client_ip: Option<IpAddr>,
    /// Request ID for tracing.
    pub request_id: Uuid,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            claims,
            client_ip: None,
            request_id: Uuid::now_v7(),
        }
    }

    /// Sets the client IP address.
    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns the caller's email claim.
    pub fn email(&self) -> Option<&str> {
        self.claims.email()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_auth_context_from_claims() {
        let mut payload = Map::new();
        payload.insert("email".to_string(), json!("a@x.com"));
        let ctx = AuthContext::from_claims(Claims::new(payload, 3600))
            .with_client_ip("127.0.0.1".parse().unwrap());

        assert_eq!(ctx.email(), Some("a@x.com"));
        assert!(ctx.client_ip.is_some());
    }

    #[test]
    fn test_context_without_email() {
        let ctx = AuthContext::from_claims(Claims::new(Map::new(), 3600));
        assert!(ctx.email().is_none());
    }
}
