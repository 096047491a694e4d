// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bistro-bin
//!
//! The `bistro` server binary: CLI parsing, logging setup, runtime
//! orchestration and graceful shutdown.
//!
//! ```text
//! bistro run --config bistro.yaml
//! bistro run --dev-mode
//! bistro validate --show-config
//! bistro version
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

pub use cli::Cli;
pub use error::{BinError, BinResult};
pub use runtime::{BistroRuntime, RuntimeBuilder};
pub use shutdown::ShutdownCoordinator;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Binary name.
pub const NAME: &str = "bistro";
