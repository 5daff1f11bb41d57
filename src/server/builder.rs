//! ServerBuilder for a fluent API to assemble and run the HTTP server

use super::handlers::RestResource;
use super::not_found::not_found_on_empty;
use super::registry::{ResourceDescriptor, ResourceRegistry};
use crate::core::store::ResourceStore;
use anyhow::Result;
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Initialize a global tracing subscriber honouring `RUST_LOG`.
///
/// Convenience for binaries; does nothing if a subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Builder for creating HTTP servers with auto-registered resource routes.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .register_resource(InMemoryResourceStore::new("items", |item: &Item| item.id.clone()))
///     .build();
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    registry: ResourceRegistry,
    custom_routes: Vec<Router>,
    cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder.
    pub fn new() -> Self {
        Self {
            registry: ResourceRegistry::new(),
            custom_routes: Vec::new(),
            cors: false,
        }
    }

    /// Expose a store under the conventional CRUD routes.
    pub fn register_resource(mut self, store: impl ResourceStore) -> Self {
        self.registry.register(Box::new(RestResource::new(store)));
        self
    }

    /// Register a pre-built descriptor, e.g. a [`RestResource`] carrying a
    /// custom decorator or a hand-written descriptor for non-CRUD routes.
    pub fn register_descriptor(mut self, descriptor: Box<dyn ResourceDescriptor>) -> Self {
        self.registry.register(descriptor);
        self
    }

    /// Add custom routes that don't fit the CRUD pattern (login endpoints,
    /// webhooks, ...). They share the process-wide middleware stack, including
    /// the empty-result 404 rewrite.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Enable a permissive CORS layer.
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Build the router: health routes, all resource routes, custom routes,
    /// and the process-wide middleware stack.
    pub fn build(self) -> Router {
        let routes = Arc::new(self.registry.route_registry());

        let mut app = health_routes().merge(self.registry.build_routes(routes));
        for custom in self.custom_routes {
            app = app.merge(custom);
        }

        app = app.layer(middleware::from_fn(not_found_on_empty));
        if self.cors {
            app = app.layer(CorsLayer::permissive());
        }
        app.layer(TraceLayer::new_for_http())
    }

    /// Build the router and serve it on the given address until shutdown.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let resources = {
            let mut names: Vec<String> = self
                .registry
                .resource_names()
                .into_iter()
                .map(String::from)
                .collect();
            names.sort_unstable();
            names
        };

        let app = self.build();
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, ?resources, "serving resource API");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "restbase"
    }))
}
