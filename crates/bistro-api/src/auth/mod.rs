// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication and authorization module.
//!
//! This module provides:
//! - Token issuance and validation
//! - The per-request authentication context
//! - Stored user roles

mod claims;
mod context;
mod jwt;
mod role;

pub use claims::Claims;
pub use context::AuthContext;
pub use jwt::{JwtConfig, JwtManager, TOKEN_LIFETIME_SECS};
pub use role::{Role, ROLE_FIELD};
