//! # restbase
//!
//! Generic CRUD resource controllers with hypermedia envelopes for axum.
//!
//! ## Features
//!
//! - **One parameterized controller**: `GET/PUT/POST /{base}/{id}` plus
//!   collection listing on `GET /{base}`, for any resource type
//! - **Persistence contract**: every verb forwards to a [`ResourceStore`],
//!   keeping the framework agnostic to the storage backend
//! - **Hypermedia envelopes**: responses wrap the payload with `{rel, href}`
//!   link relations, including a `self` link composed from an explicit route
//!   registry
//! - **Empty-result 404s**: a process-wide middleware rewrites successful GET
//!   responses with empty bodies into `404 Not Found`
//! - **Principal pass-through**: the authenticated caller travels opaquely
//!   from the request headers to the store for backend-side authorization
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restbase::prelude::*;
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Item {
//!     id: String,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     init_tracing();
//!
//!     let items = InMemoryResourceStore::new("items", |item: &Item| item.id.clone());
//!
//!     ServerBuilder::new()
//!         .register_resource(items)
//!         .serve("0.0.0.0:3000")
//!         .await
//! }
//! ```
//!
//! [`ResourceStore`]: crate::core::ResourceStore

pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        envelope::{Envelope, LinkRelation, SELF_REL},
        error::RestError,
        principal::{PRINCIPAL_HEADER, Principal},
        store::{NoopDecorator, ResourceDecorator, ResourceStore},
    };

    // === Server ===
    pub use crate::server::{
        ResourceDescriptor, ResourceRegistry, ResourceState, RestResource, RouteRegistry,
        ServerBuilder, init_tracing, not_found_on_empty,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryResourceStore;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Json, Router,
        extract::{Path, State},
        routing::{get, post, put},
    };
}
