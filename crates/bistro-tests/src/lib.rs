// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Bistro Integration Tests
//!
//! End-to-end tests that drive the full HTTP router against the in-memory
//! store, plus cross-crate configuration and store tests.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bistro-tests
//! cargo test -p bistro-tests --test integration_api
//! ```
//!
//! ## Using the Harness
//!
//! ```rust,ignore
//! use bistro_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let app = TestApp::new();
//!     let admin = app.seed_admin("chef@bistro.test").await;
//!     let (status, body) = app.get("/user", Some(&admin)).await;
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::init_test_logging;
}
