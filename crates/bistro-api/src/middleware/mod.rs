// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the API server.
//!
//! Protected routes stack two gates, outermost first:
//!
//! - [`AuthLayer`]: bearer token authentication
//! - [`AdminLayer`]: stored-role admin check

mod admin;
mod auth;

pub use admin::{AdminLayer, AdminMiddleware};
pub use auth::{AuthLayer, AuthMiddleware};
