// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::{ApiConfig, CorsConfig};
use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::{AdminLayer, AuthLayer};
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// This is the main entry point for creating and running the HTTP server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates the router with all routes and middleware.
    ///
    /// Public routes carry no gate. Protected routes get the authentication
    /// gate and, where needed, the admin gate through `route_layer`, so a
    /// path can mix public and protected methods.
    ///
    /// There is no request timeout layer. A store call runs to completion and
    /// is bounded only by the driver's own timeouts.
    pub fn router(&self) -> Router {
        let authenticated = AuthLayer::new(self.state.jwt_manager.clone());
        let admin_only = ServiceBuilder::new()
            .layer(AuthLayer::new(self.state.jwt_manager.clone()))
            .layer(AdminLayer::new(self.state.store.clone()));

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(create_cors_layer(&self.config.cors))
            .layer(DefaultBodyLimit::max(self.config.max_body_size));

        Router::new()
            // Public
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/ready", get(handlers::ready))
            .route("/jwt", post(handlers::issue_token))
            .route("/review", get(handlers::list_reviews))
            // Menu
            .route(
                "/menu",
                get(handlers::list_menu)
                    .merge(post(handlers::create_menu_item).route_layer(admin_only.clone())),
            )
            .route(
                "/menu/{id}",
                get(handlers::get_menu_item).merge(
                    patch(handlers::update_menu_item)
                        .delete(handlers::delete_menu_item)
                        .route_layer(admin_only.clone()),
                ),
            )
            // Users
            .route(
                "/user",
                post(handlers::register_user)
                    .merge(get(handlers::list_users).route_layer(admin_only.clone())),
            )
            .route(
                "/user/{id}",
                delete(handlers::delete_user).route_layer(admin_only.clone()),
            )
            .route(
                "/user/admin/{key}",
                get(handlers::admin_status)
                    .route_layer(authenticated)
                    .merge(patch(handlers::make_admin).route_layer(admin_only)),
            )
            // Carts
            .route(
                "/cart",
                get(handlers::list_carts).post(handlers::add_to_cart),
            )
            .route("/cart/{id}", delete(handlers::delete_cart_item))
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        self.serve(listener, shutdown_signal).await
    }

    /// Serves on an already bound listener until `shutdown_signal` resolves.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let router = self.router();
        let addr = listener
            .local_addr()
            .map_err(|e| ApiError::internal(format!("Listener has no address: {}", e)))?;

        info!(
            addr = %addr,
            store = self.state.store.backend_name(),
            "Starting API server"
        );

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
///
/// Credentials are only enabled with an explicit origin and header list;
/// browsers reject them next to wildcards.
fn create_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new().max_age(Duration::from_secs(cors.max_age));

    let any_origin = cors.allows_any_origin();
    if any_origin {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    let any_header = cors.allowed_headers.iter().any(|h| h == "*");
    if any_header {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        layer = layer.allow_headers(headers);
    }

    if cors.allow_credentials {
        if any_origin || any_header {
            tracing::warn!("CORS credentials ignored with wildcard origins or headers");
        } else {
            layer = layer.allow_credentials(true);
        }
    }

    layer
}

// =============================================================================
// Tests
// =============================================================================
