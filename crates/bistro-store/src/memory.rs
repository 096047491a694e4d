// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory document store for testing and development.
//!
//! Documents live in a `HashMap` of per-collection vectors guarded by a
//! `parking_lot::RwLock`. Insertion order is preserved, so `find` returns
//! documents in the order they were written. Nothing is persisted.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::traits::{
    Collection, DeleteResult, Document, DocumentStore, Filter, InsertOneResult, UpdateResult,
    ID_FIELD,
};

/// An in-memory [`DocumentStore`].
///
/// This struct is `Send + Sync` and cheap to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in a collection.
    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map_or(0, Vec::len)
    }

    fn generate_id() -> String {
        Uuid::now_v7().simple().to_string()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, filter: Filter) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read();
        let found: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default();
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> StoreResult<InsertOneResult> {
        let id = Self::generate_id();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(document);

        debug!(collection = %collection, id = %id, "Inserted document");
        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        fields: Document,
    ) -> StoreResult<UpdateResult> {
        let mut collections = self.collections.write();
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(doc)))
        else {
            return Ok(UpdateResult {
                acknowledged: true,
                ..UpdateResult::default()
            });
        };

        let mut modified = false;
        for (field, value) in fields {
            if field == ID_FIELD {
                continue;
            }
            if doc.get(&field) != Some(&value) {
                doc.insert(field, value);
                modified = true;
            }
        }

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> StoreResult<DeleteResult> {
        let mut collections = self.collections.write();
        let deleted = match collections.get_mut(&collection) {
            Some(docs) => match docs.iter().position(|doc| filter.matches(doc)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: deleted,
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

// =============================================================================
// Tests
// =============================================================================
