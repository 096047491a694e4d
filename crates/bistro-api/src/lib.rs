// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bistro-api
//!
//! REST API server for the Bistro restaurant ordering backend.
//!
//! Token issuance, a bearer-token authentication gate and a stored-role admin
//! gate sit in front of thin handlers that each perform one document store
//! operation.
//!
//! ```text
//! POST /jwt ──► token
//!                 │
//! request ──► AuthLayer ──► AdminLayer (admin routes) ──► handler ──► DocumentStore
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use auth::{AuthContext, Claims, JwtConfig, JwtManager, Role};
pub use config::{ApiConfig, CorsConfig};
pub use error::{ApiError, ApiResult};
pub use server::ApiServer;
pub use state::{AppState, AppStateBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
