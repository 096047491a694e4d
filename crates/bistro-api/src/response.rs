// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.
//!
//! Store reads are returned as the raw documents and writes as the store's
//! result objects (`insertedId`, `deletedCount`, ...). The types here cover
//! the remaining fixed-shape bodies.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth Responses
// =============================================================================

/// Response to `POST /jwt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed bearer token.
    pub token: String,
}

/// Response to `GET /user/admin/{email}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdminStatusResponse {
    /// Whether the user holds the admin role.
    pub admin: bool,
}

/// Response to a registration for an email that is already taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingUserResponse {
    /// Explanation.
    pub message: String,
    /// Always `null`; keeps the shape of an insert result.
    pub inserted_id: Option<String>,
}

impl ExistingUserResponse {
    /// Creates the response.
    pub fn new() -> Self {
        Self {
            message: "user already exists".to_string(),
            inserted_id: None,
        }
    }
}

impl Default for ExistingUserResponse {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Health Responses
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

/// Readiness check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Whether the service is ready.
    pub ready: bool,
    /// Component statuses.
    pub components: Vec<ComponentStatus>,
}

/// Status of a system component.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// Component name.
    pub name: String,
    /// Whether the component is healthy.
    pub healthy: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_user_shape() {
        let value = serde_json::to_value(ExistingUserResponse::new()).unwrap();
        assert_eq!(value["message"], "user already exists");
        assert!(value["insertedId"].is_null());
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, crate::VERSION);
    }
}
