//! Persistence contract consumed by the generic resource controller

use crate::core::envelope::Envelope;
use crate::core::principal::Principal;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Persistence contract for a single resource type.
///
/// The controller is agnostic to the underlying storage mechanism: every HTTP
/// verb is forwarded here, and the backend decides what the operation means.
/// Implementations own all authorization decisions; the [`Principal`] is
/// passed through opaquely.
///
/// The split between [`update`](ResourceStore::update) and
/// [`insert`](ResourceStore::insert) mirrors the PUT/POST convention: repeated
/// `update` calls with the same id and value must converge to the same stored
/// state, while `insert` may have cumulative effects (e.g., appending to a
/// shopping cart rather than replacing a catalog entry). The framework
/// documents this contract but does not enforce it.
#[async_trait]
pub trait ResourceStore: Send + Sync + 'static {
    /// The resource type exposed by this store.
    type Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// The plural resource name used as the URL path segment and as the
    /// diagnostics label (e.g., "items", "sessions").
    fn resource_name(&self) -> &'static str;

    /// Extract the identifier of a resource, used to build per-item self
    /// links on the collection route.
    fn resource_id(&self, resource: &Self::Resource) -> String;

    /// List all resources visible to the principal.
    async fn list(&self, principal: &Principal) -> Result<Vec<Self::Resource>>;

    /// Fetch a resource by id. Absence is an explicit `None`, never an error.
    async fn get_by_id(
        &self,
        id: &str,
        principal: &Principal,
    ) -> Result<Option<Self::Resource>>;

    /// Update or replace the resource stored under `id`. Idempotent from the
    /// caller's perspective.
    async fn update(
        &self,
        id: &str,
        value: Self::Resource,
        principal: &Principal,
    ) -> Result<Self::Resource>;

    /// Insert a resource under `id`. May have side effects beyond replacement.
    async fn insert(
        &self,
        id: &str,
        value: Self::Resource,
        principal: &Principal,
    ) -> Result<Self::Resource>;
}

/// Hooks invoked after the controller builds an envelope, allowing callers to
/// attach resource-specific hyperlinks or metadata.
///
/// Both hooks default to no-ops; register a custom decorator on a
/// [`RestResource`](crate::server::handlers::RestResource) to override them.
pub trait ResourceDecorator<R>: Send + Sync {
    /// Called once per single-resource envelope, after the self link has been
    /// attached. `id` is the identifier the envelope was built for, so
    /// decorators can compose deep links without re-deriving it from the
    /// payload.
    fn decorate_item(&self, _envelope: &mut Envelope<R>, _id: &str) {}

    /// Called once per collection response, after all item envelopes have
    /// been built and decorated.
    fn decorate_collection(&self, _envelope: &mut Envelope<Vec<Envelope<R>>>) {}
}

/// Decorator that attaches nothing; the default for every resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecorator;

impl<R> ResourceDecorator<R> for NoopDecorator {}
