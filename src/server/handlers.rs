//! Generic CRUD handlers forwarding HTTP verbs to a [`ResourceStore`]
//!
//! One parameterized controller covers every resource type:
//!
//! - `GET    /{base}/{id}` retrieves a resource by id
//! - `PUT    /{base}/{id}` updates a resource
//! - `POST   /{base}/{id}` inserts a resource
//! - `GET    /{base}`      lists all resources
//!
//! The difference between PUT and POST is that the same PUT request executed
//! more than once always has the same result. Both delegate to the store
//! ([`ResourceStore::update`] vs [`ResourceStore::insert`]), so the backend
//! chooses the behaviour of each: a catalog could use PUT to replace an
//! article and POST to append the same article to a shopping cart.
//!
//! Handlers never set a 404 themselves. An absent resource serializes as a
//! JSON `null` body, and the process-wide
//! [`not_found_on_empty`](crate::server::not_found::not_found_on_empty)
//! middleware rewrites the status.

use crate::core::envelope::{Envelope, SELF_REL};
use crate::core::error::RestError;
use crate::core::principal::Principal;
use crate::core::store::{NoopDecorator, ResourceDecorator, ResourceStore};
use crate::server::registry::ResourceDescriptor;
use crate::server::routes::RouteRegistry;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Per-resource state shared by the CRUD handlers.
pub struct ResourceState<S: ResourceStore> {
    /// The persistence backend every verb is forwarded to.
    pub store: Arc<S>,
    /// Registry used to compose canonical self-link URIs.
    pub routes: Arc<RouteRegistry>,
    /// Hooks attaching resource-specific links to built envelopes.
    pub decorator: Arc<dyn ResourceDecorator<S::Resource>>,
}

impl<S: ResourceStore> Clone for ResourceState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            routes: self.routes.clone(),
            decorator: self.decorator.clone(),
        }
    }
}

/// Generic CRUD descriptor binding one store (plus an optional decorator) to
/// the conventional resource routes.
pub struct RestResource<S: ResourceStore> {
    store: Arc<S>,
    decorator: Arc<dyn ResourceDecorator<S::Resource>>,
}

impl<S: ResourceStore> RestResource<S> {
    /// Expose a store under the conventional routes with no extra links.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            decorator: Arc::new(NoopDecorator),
        }
    }

    /// Replace the no-op decorator with a resource-specific one.
    pub fn with_decorator(
        mut self,
        decorator: impl ResourceDecorator<S::Resource> + 'static,
    ) -> Self {
        self.decorator = Arc::new(decorator);
        self
    }
}

impl<S: ResourceStore> ResourceDescriptor for RestResource<S> {
    fn resource_name(&self) -> &str {
        self.store.resource_name()
    }

    fn build_routes(&self, routes: Arc<RouteRegistry>) -> Router {
        let state = ResourceState {
            store: self.store.clone(),
            routes,
            decorator: self.decorator.clone(),
        };
        let base = self.base_path();

        Router::new()
            .route(
                &format!("{base}/{{id}}"),
                get(get_resource::<S>)
                    .put(put_resource::<S>)
                    .post(post_resource::<S>),
            )
            .route(&base, get(list_resources::<S>))
            .with_state(state)
    }
}

/// `GET /{base}/{id}`: fetch one resource.
///
/// An absent resource yields a 200 with a `null` body here; the not-found
/// middleware turns that into the 404 the client sees.
pub async fn get_resource<S: ResourceStore>(
    State(state): State<ResourceState<S>>,
    Path(id): Path<String>,
    principal: Principal,
) -> Result<Response, RestError> {
    let resource = state.store.resource_name();
    debug!(resource, %id, "GET resource by id");

    let found = state.store.get_by_id(&id, &principal).await?;
    match found {
        Some(value) => {
            debug!(resource, %id, "resource found");
            Ok(Json(build_envelope(&state, &id, value)).into_response())
        }
        None => {
            debug!(resource, %id, "resource absent");
            Ok(Json(Value::Null).into_response())
        }
    }
}

/// `PUT /{base}/{id}`: idempotent update-or-replace.
///
/// A JSON `null` body produces an empty result with status 200 instead of a
/// client error. Kept for backward compatibility with existing callers;
/// callers must not rely on it as validation.
pub async fn put_resource<S: ResourceStore>(
    State(state): State<ResourceState<S>>,
    Path(id): Path<String>,
    principal: Principal,
    Json(value): Json<Option<S::Resource>>,
) -> Result<Response, RestError> {
    let resource = state.store.resource_name();
    debug!(resource, %id, "PUT resource");

    let Some(value) = present(&id, value) else {
        debug!(resource, %id, "missing id or value, suppressing result");
        return Ok(Json(Value::Null).into_response());
    };

    let stored = state.store.update(&id, value, &principal).await?;
    Ok(Json(build_envelope(&state, &id, stored)).into_response())
}

/// `POST /{base}/{id}`: non-idempotent insert.
///
/// Transport semantics are identical to PUT; only the delegated store
/// operation differs. The same weak `null`-body policy applies.
pub async fn post_resource<S: ResourceStore>(
    State(state): State<ResourceState<S>>,
    Path(id): Path<String>,
    principal: Principal,
    Json(value): Json<Option<S::Resource>>,
) -> Result<Response, RestError> {
    let resource = state.store.resource_name();
    debug!(resource, %id, "POST resource");

    let Some(value) = present(&id, value) else {
        debug!(resource, %id, "missing id or value, suppressing result");
        return Ok(Json(Value::Null).into_response());
    };

    let stored = state.store.insert(&id, value, &principal).await?;
    Ok(Json(build_envelope(&state, &id, stored)).into_response())
}

/// `GET /{base}`: list all resources visible to the principal.
///
/// Builds one envelope per item, each with its own self link, then hands the
/// aggregate to the collection decorator. An empty list yields a `null` body
/// (and therefore a 404 after the middleware).
pub async fn list_resources<S: ResourceStore>(
    State(state): State<ResourceState<S>>,
    principal: Principal,
) -> Result<Response, RestError> {
    let resource = state.store.resource_name();
    debug!(resource, "GET resource collection");

    let items = state.store.list(&principal).await?;
    if items.is_empty() {
        debug!(resource, "collection empty");
        return Ok(Json(Value::Null).into_response());
    }

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let id = state.store.resource_id(&item);
        entries.push(build_envelope(&state, &id, item));
    }

    debug!(resource, count = entries.len(), "collection built");

    let mut collection = Envelope::new(entries);
    state.decorator.decorate_collection(&mut collection);
    Ok(Json(collection).into_response())
}

/// The weak input policy shared by PUT and POST: a blank id or a `null` value
/// suppresses the operation entirely.
fn present<R>(id: &str, value: Option<R>) -> Option<R> {
    if id.trim().is_empty() {
        return None;
    }
    value
}

/// Wrap a resource in an envelope, attach its self link, and run the item
/// decorator hook.
fn build_envelope<S: ResourceStore>(
    state: &ResourceState<S>,
    id: &str,
    value: S::Resource,
) -> Envelope<S::Resource> {
    let mut envelope = Envelope::new(value);
    if let Some(href) = state.routes.resource_uri(state.store.resource_name(), id) {
        envelope.add_link(SELF_REL, href);
    }
    state.decorator.decorate_item(&mut envelope, id);
    envelope
}
