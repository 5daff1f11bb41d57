//! Route registry for composing canonical resource URIs
//!
//! Self links need the canonical retrieval URI of a resource from inside the
//! handler that serves it. Rather than introspecting the router, the registry
//! is an explicit collaborator: it records where each resource is mounted and
//! composes deep links from (resource name, id) pairs.

use std::collections::HashMap;

/// Maps resource names to their mounted base paths and composes canonical
/// retrieval URIs.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    bases: HashMap<String, String>,
}

impl RouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bases: HashMap::new(),
        }
    }

    /// Register a resource under the conventional base path `/{name}`.
    pub fn register(&mut self, resource_name: &str) {
        self.mount(resource_name, &format!("/{resource_name}"));
    }

    /// Register a resource under an explicit base path.
    pub fn mount(&mut self, resource_name: &str, base_path: &str) {
        self.bases
            .insert(resource_name.to_string(), base_path.trim_end_matches('/').to_string());
    }

    /// The base path a resource is mounted under, if registered.
    pub fn base_path(&self, resource_name: &str) -> Option<&str> {
        self.bases.get(resource_name).map(String::as_str)
    }

    /// The canonical collection URI for a resource (its single-item GET route
    /// without the id segment).
    pub fn collection_uri(&self, resource_name: &str) -> Option<String> {
        self.base_path(resource_name).map(String::from)
    }

    /// The canonical retrieval URI for one resource instance; the target of
    /// its `self` link.
    pub fn resource_uri(&self, resource_name: &str, id: &str) -> Option<String> {
        self.base_path(resource_name)
            .map(|base| format!("{base}/{id}"))
    }

    /// All registered resource names.
    pub fn resource_names(&self) -> Vec<&str> {
        self.bases.keys().map(String::as_str).collect()
    }
}
