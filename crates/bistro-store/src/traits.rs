// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Document store traits and shared types.
//!
//! Records are schema-less JSON objects grouped into named collections. Every
//! backend exposes the same five operations:
//!
//! - `find`: all documents matching a filter (an empty filter matches all)
//! - `find_one`: the first matching document
//! - `insert_one`: store a new document and return its id
//! - `update_one`: set fields on the first matching document
//! - `delete_one`: remove the first matching document
//!
//! Filters are equality matches on top-level fields. The `_id` field is the
//! record identifier and is always rendered as a string in returned documents.
//!
//! # Example
//!
//! ```rust,ignore
//! use bistro_store::{Collection, DocumentStore, Filter, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let user = store
//!     .find_one(Collection::User, Filter::eq("email", "a@x.com"))
//!     .await?;
//! ```

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// Name of the identifier field present on every stored document.
pub const ID_FIELD: &str = "_id";

/// A schema-less record.
pub type Document = Map<String, Value>;

// =============================================================================
// Collection
// =============================================================================

/// The collections used by the ordering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Menu items.
    Menu,
    /// Customer reviews.
    Review,
    /// Registered users.
    User,
    /// Shopping cart entries.
    Cart,
}

impl Collection {
    /// Returns the collection name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Menu => "menu",
            Collection::Review => "review",
            Collection::User => "user",
            Collection::Cart => "cart",
        }
    }

    /// Returns every collection.
    pub fn all() -> &'static [Collection] {
        &[
            Collection::Menu,
            Collection::Review,
            Collection::User,
            Collection::Cart,
        ]
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Equality filter over top-level document fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Document,
}

impl Filter {
    /// A filter that matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter on a single field.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// A filter on the document identifier.
    pub fn by_id(id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self::eq(ID_FIELD, id)
    }

    /// Adds another equality condition.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns `true` if the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the raw conditions.
    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// Returns `true` if the document satisfies every condition.
    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

impl From<Document> for Filter {
    fn from(fields: Document) -> Self {
        Self { fields }
    }
}

// =============================================================================
// Operation Results
// =============================================================================

/// Outcome of [`DocumentStore::insert_one`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    /// Whether the write was acknowledged.
    pub acknowledged: bool,
    /// Identifier of the new document.
    pub inserted_id: String,
}

/// Outcome of [`DocumentStore::update_one`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Whether the write was acknowledged.
    pub acknowledged: bool,
    /// Number of documents matched by the filter.
    pub matched_count: u64,
    /// Number of documents actually changed.
    pub modified_count: u64,
}

/// Outcome of [`DocumentStore::delete_one`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Whether the write was acknowledged.
    pub acknowledged: bool,
    /// Number of documents removed.
    pub deleted_count: u64,
}

// =============================================================================
// DocumentStore
// =============================================================================

/// Asynchronous access to a document database.
///
/// Implementations must be safe to share across concurrently running
/// requests; a single handle is opened at startup and cloned behind an `Arc`.
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// Returns all documents in `collection` matching `filter`.
    async fn find(&self, collection: Collection, filter: Filter) -> StoreResult<Vec<Document>>;

    /// Returns the first document in `collection` matching `filter`.
    async fn find_one(&self, collection: Collection, filter: Filter)
        -> StoreResult<Option<Document>>;

    /// Inserts `document` into `collection`.
    ///
    /// Any `_id` supplied by the caller is replaced by a backend-generated one.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> StoreResult<InsertOneResult>;

    /// Sets `fields` on the first document matching `filter`. Nothing is
    /// created when no document matches.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        fields: Document,
    ) -> StoreResult<UpdateResult>;

    /// Removes the first document matching `filter`.
    async fn delete_one(&self, collection: Collection, filter: Filter)
        -> StoreResult<DeleteResult>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for logs and readiness output.
    fn backend_name(&self) -> &'static str;
}

/// Converts an arbitrary JSON value into a document.
pub fn into_document(value: Value) -> StoreResult<Document> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::invalid_document(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Tests
// =============================================================================
