//! Resource registry for collecting descriptors and merging their routers

use super::routes::RouteRegistry;
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait that describes how to build the HTTP routes for one resource.
///
/// The generic CRUD implementation is [`RestResource`]; applications with
/// routes that do not fit the CRUD pattern can implement this trait directly
/// and register the descriptor on the builder.
///
/// [`RestResource`]: crate::server::handlers::RestResource
pub trait ResourceDescriptor: Send + Sync {
    /// The plural resource name (e.g., "items").
    fn resource_name(&self) -> &str;

    /// The base path this resource is mounted under.
    fn base_path(&self) -> String {
        format!("/{}", self.resource_name())
    }

    /// Build the routes for this resource.
    ///
    /// The route registry is shared across all resources so handlers can
    /// compose deep links to any registered resource.
    fn build_routes(&self, routes: Arc<RouteRegistry>) -> Router;
}

/// Registry for all resources exposed by one server.
///
/// Collects descriptors keyed by resource name and produces a merged router
/// plus the [`RouteRegistry`] used for self-link composition.
#[derive(Default)]
pub struct ResourceRegistry {
    descriptors: HashMap<String, Box<dyn ResourceDescriptor>>,
}

impl ResourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register a resource descriptor. A descriptor registered under an
    /// already-known resource name replaces the previous one.
    pub fn register(&mut self, descriptor: Box<dyn ResourceDescriptor>) {
        let name = descriptor.resource_name().to_string();
        self.descriptors.insert(name, descriptor);
    }

    /// Build the route registry covering every registered resource.
    pub fn route_registry(&self) -> RouteRegistry {
        let mut routes = RouteRegistry::new();
        for descriptor in self.descriptors.values() {
            routes.mount(descriptor.resource_name(), &descriptor.base_path());
        }
        routes
    }

    /// Build a router with all registered resource routes merged.
    pub fn build_routes(&self, routes: Arc<RouteRegistry>) -> Router {
        let mut router = Router::new();
        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes(routes.clone()));
        }
        router
    }

    /// Get all registered resource names.
    pub fn resource_names(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }
}
