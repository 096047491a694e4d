// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bistro-store
//!
//! Document store abstraction for the Bistro ordering backend.
//!
//! Handlers never talk to a database driver directly. They go through the
//! [`DocumentStore`] trait, which offers the five single-document operations
//! the service needs over the `menu`, `review`, `user` and `cart` collections.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: in-process store for tests and local development
//! - [`MongoStore`]: MongoDB backend (feature `mongodb-backend`, enabled by default)

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod memory;
#[cfg(feature = "mongodb-backend")]
pub mod mongo;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
#[cfg(feature = "mongodb-backend")]
pub use mongo::{MongoConfig, MongoStore};
pub use traits::{
    into_document, Collection, DeleteResult, Document, DocumentStore, Filter, InsertOneResult,
    UpdateResult, ID_FIELD,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
