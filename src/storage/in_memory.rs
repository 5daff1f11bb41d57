//! In-memory implementation of ResourceStore for testing and development

use crate::core::principal::Principal;
use crate::core::store::ResourceStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// In-memory resource store keyed by id.
///
/// Useful for testing and development. Uses a `BTreeMap` behind an `RwLock`,
/// so listings come back ordered by id. The store ignores the principal;
/// real backends are expected to apply their own access policy.
///
/// Operation semantics: `update` replaces whatever is stored under the id,
/// `insert` only stores the value when the id is still free and otherwise
/// returns the existing resource unchanged.
pub struct InMemoryResourceStore<R> {
    name: &'static str,
    id_of: fn(&R) -> String,
    items: Arc<RwLock<BTreeMap<String, R>>>,
}

impl<R> InMemoryResourceStore<R> {
    /// Create an empty store for the given resource name.
    ///
    /// `id_of` extracts the identifier from a resource value, used to build
    /// per-item self links on the collection route.
    pub fn new(name: &'static str, id_of: fn(&R) -> String) -> Self {
        Self {
            name,
            id_of,
            items: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    /// Whether the store holds no resources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> Clone for InMemoryResourceStore<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            id_of: self.id_of,
            items: self.items.clone(),
        }
    }
}

#[async_trait]
impl<R> ResourceStore for InMemoryResourceStore<R>
where
    R: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Resource = R;

    fn resource_name(&self) -> &'static str {
        self.name
    }

    fn resource_id(&self, resource: &R) -> String {
        (self.id_of)(resource)
    }

    async fn list(&self, _principal: &Principal) -> Result<Vec<R>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("failed to acquire read lock: {e}"))?;

        Ok(items.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str, _principal: &Principal) -> Result<Option<R>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("failed to acquire read lock: {e}"))?;

        Ok(items.get(id).cloned())
    }

    async fn update(&self, id: &str, value: R, _principal: &Principal) -> Result<R> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("failed to acquire write lock: {e}"))?;

        items.insert(id.to_string(), value.clone());

        Ok(value)
    }

    async fn insert(&self, id: &str, value: R, _principal: &Principal) -> Result<R> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("failed to acquire write lock: {e}"))?;

        Ok(items.entry(id.to_string()).or_insert(value).clone())
    }
}
