// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bistro-config
//!
//! Configuration management for the Bistro ordering backend.
//!
//! Configuration is read from a YAML, TOML or JSON file, with `${VAR}`
//! placeholders and environment variable overrides. The deployment variables
//! `PORT`, `ACCESS_TOKEN_SECRET`, `DB_USER` and `DB_PASS` are honoured as-is.
//!
//! ```yaml
//! server:
//!   port: 5000
//! auth:
//!   secret: "${ACCESS_TOKEN_SECRET}"
//! store:
//!   backend: mongodb
//!   database: bistroRestaurant
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader};
pub use schema::{
    AuthConfig, BistroConfig, CorsConfig, LogFormat, LogLevel, LoggingConfig, SecretValue,
    ServerConfig, StoreBackend, StoreConfig, DEFAULT_APP_NAME, DEFAULT_CLUSTER_HOST,
    DEFAULT_DATABASE, DEFAULT_PORT,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
