// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use bistro_store::DocumentStore;

use crate::auth::JwtManager;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers and gates.
///
/// Cloning is cheap; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// JWT manager for token operations.
    pub jwt_manager: Arc<JwtManager>,
    /// Document store opened at startup.
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the JWT manager.
    pub fn jwt(&self) -> &JwtManager {
        &self.jwt_manager
    }

    /// Returns the document store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("addr", &self.config.socket_addr())
            .field("store", &self.store.backend_name())
            .finish()
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    jwt_manager: Option<Arc<JwtManager>>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the JWT manager.
    pub fn jwt_manager(mut self, manager: Arc<JwtManager>) -> Self {
        self.jwt_manager = Some(manager);
        self
    }

    /// Sets the document store.
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the AppState.
    ///
    /// Fails when no store was supplied or when the JWT manager has to be
    /// created from a configuration without a secret.
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let jwt_manager = match self.jwt_manager {
            Some(manager) => manager,
            None => Arc::new(JwtManager::new(config.jwt.clone())?),
        };

        let store = self
            .store
            .ok_or_else(|| ApiError::internal("document store is not configured"))?;

        Ok(AppState {
            config: Arc::new(config),
            jwt_manager,
            store,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
