// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server runtime orchestration.
//!
//! Startup order:
//!
//! 1. Open the document store and ping it once
//! 2. Build the token manager and shared application state
//! 3. Serve HTTP until a shutdown signal arrives
//! 4. Give in-flight requests `server.shutdown_timeout` to finish

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use bistro_api::{ApiConfig, ApiServer, AppState, CorsConfig, JwtConfig, JwtManager};
use bistro_config::{BistroConfig, ConfigLoader, StoreBackend, StoreConfig};
use bistro_store::{DocumentStore, MemoryStore};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// BistroRuntime
// =============================================================================

/// The server runtime.
pub struct BistroRuntime {
    config: Arc<BistroConfig>,
    shutdown: ShutdownCoordinator,
    notices: Vec<String>,
}

impl BistroRuntime {
    /// Creates a runtime for an already validated configuration.
    pub fn new(config: BistroConfig) -> Self {
        Self {
            config: Arc::new(config),
            shutdown: ShutdownCoordinator::new(),
            notices: Vec::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BistroConfig {
        &self.config
    }

    /// Warnings raised while the configuration was assembled, before logging
    /// existed. The caller logs them once its subscriber is installed.
    pub fn startup_notices(&self) -> &[String] {
        &self.notices
    }

    /// Returns a handle that can stop the running server.
    pub fn shutdown_handle(&self) -> ShutdownCoordinator {
        self.shutdown.clone()
    }

    /// Runs the server until shutdown is signaled.
    pub async fn run(self) -> BinResult<()> {
        info!(version = crate::VERSION, "Starting Bistro");

        let store = open_store(&self.config.store).await?;
        check_store(store.as_ref()).await;

        let state = build_state(&self.config, store)?;
        let server = ApiServer::new(state);

        tokio::spawn(self.shutdown.clone().listen_for_signals());

        let grace_period = self.config.server.shutdown_timeout;
        let deadline = {
            let signal = self.shutdown.shutdown_signal();
            async move {
                signal.await;
                tokio::time::sleep(grace_period).await;
            }
        };

        tokio::select! {
            result = server.run_with_shutdown(self.shutdown.shutdown_signal()) => result?,
            _ = deadline => {
                warn!(
                    "In-flight requests did not finish within {:?}, forcing shutdown",
                    grace_period
                );
            }
        }

        info!("Bistro shutdown complete");
        Ok(())
    }
}

// =============================================================================
// Component Construction
// =============================================================================

/// Opens the configured document store.
pub async fn open_store(config: &StoreConfig) -> BinResult<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Mongodb => open_mongo(config).await,
    }
}

#[cfg(feature = "mongodb-backend")]
async fn open_mongo(config: &StoreConfig) -> BinResult<Arc<dyn DocumentStore>> {
    use bistro_store::{MongoConfig, MongoStore};

    let uri = config.connection_uri().ok_or_else(|| {
        BinError::config("mongodb backend requires store.uri or DB_USER and DB_PASS")
    })?;
    let mongo = MongoConfig::new(uri, &config.database).with_app_name(&config.app_name);

    let store = MongoStore::connect(&mongo)
        .await
        .map_err(|e| BinError::from(e).with_context("opening MongoDB"))?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongodb-backend"))]
async fn open_mongo(_config: &StoreConfig) -> BinResult<Arc<dyn DocumentStore>> {
    Err(BinError::init(
        "this build has no MongoDB support; use store.backend = memory",
    ))
}

/// Pings the store once. An unreachable store is logged, not fatal; requests
/// fail individually until it comes back.
async fn check_store(store: &dyn DocumentStore) {
    match store.ping().await {
        Ok(()) => info!(backend = store.backend_name(), "Document store is reachable"),
        Err(e) => warn!(
            backend = store.backend_name(),
            error = %e,
            "Document store ping failed"
        ),
    }
}

/// Maps the file configuration onto the HTTP layer's settings.
pub fn api_config(config: &BistroConfig) -> ApiConfig {
    let server = &config.server;
    let cors = &server.cors;

    let mut api = ApiConfig::new()
        .with_host(server.host)
        .with_port(server.port)
        .with_jwt(JwtConfig::new(config.auth.secret.expose()));
    api.shutdown_timeout = server.shutdown_timeout;
    api.max_body_size = server.max_body_size;
    api.cors = CorsConfig {
        allowed_origins: cors.allowed_origins.clone(),
        allowed_methods: cors.allowed_methods.clone(),
        allowed_headers: cors.allowed_headers.clone(),
        allow_credentials: cors.allow_credentials,
        max_age: cors.max_age,
    };
    api
}

/// Builds the shared application state.
pub fn build_state(config: &BistroConfig, store: Arc<dyn DocumentStore>) -> BinResult<AppState> {
    let api = api_config(config);
    let jwt_manager = JwtManager::new(api.jwt.clone())?;

    Ok(AppState::builder()
        .config(api)
        .jwt_manager(Arc::new(jwt_manager))
        .store(store)
        .build()?)
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for constructing the runtime.
#[derive(Default)]
pub struct RuntimeBuilder {
    config_path: Option<PathBuf>,
    config: Option<BistroConfig>,
    loader: Option<ConfigLoader>,
    dev_mode: bool,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration file path.
    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the configuration directly.
    pub fn config(mut self, config: BistroConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses a custom loader for the configuration file.
    pub fn loader(mut self, loader: ConfigLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Enables development mode.
    ///
    /// Forces the in-memory store and generates a token secret when none is
    /// configured.
    pub fn dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    /// Loads, adjusts and validates the configuration.
    ///
    /// Nothing is logged here. Fallbacks are recorded as
    /// [`BistroRuntime::startup_notices`].
    pub fn build(self) -> BinResult<BistroRuntime> {
        let mut notices = Vec::new();

        let mut config = match self.config {
            Some(config) => config,
            None => {
                let path = self
                    .config_path
                    .ok_or_else(|| BinError::config("No configuration provided"))?;
                if !path.exists() {
                    notices.push(format!(
                        "Configuration file {} not found, using defaults and environment",
                        path.display()
                    ));
                }
                self.loader
                    .unwrap_or_default()
                    .with_validation(false)
                    .load_or_default(&path)
                    .map_err(|e| BinError::from(e).with_context(format!("loading {}", path.display())))?
            }
        };

        if self.dev_mode {
            apply_dev_mode(&mut config, &mut notices);
        }
        config.validate()?;

        let mut runtime = BistroRuntime::new(config);
        runtime.notices = notices;
        Ok(runtime)
    }
}

fn apply_dev_mode(config: &mut BistroConfig, notices: &mut Vec<String>) {
    notices.push("Development mode: using the in-memory store".to_string());
    config.store.backend = StoreBackend::Memory;

    if config.auth.secret.is_empty() {
        notices.push(
            "Development mode: no token secret configured, generating a throwaway one".to_string(),
        );
        config.auth.secret = uuid::Uuid::new_v4().simple().to_string().into();
    }
}

// =============================================================================
// Tests
// =============================================================================
