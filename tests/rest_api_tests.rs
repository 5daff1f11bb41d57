//! End-to-end tests exercising the generic CRUD controller over HTTP
//!
//! These tests verify the complete flow from request to response: envelope
//! shapes, self links, the empty-result 404 rewrite, the weak null-body
//! policy on writes, and principal pass-through to the store.

use anyhow::anyhow;
use axum::http::StatusCode;
use axum_test::TestServer;
use restbase::prelude::*;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

// =============================================================================
// Test Resources
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Item {
    id: String,
    name: String,
}

fn item(id: &str, name: &str) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn item_store() -> InMemoryResourceStore<Item> {
    InMemoryResourceStore::new("items", |item: &Item| item.id.clone())
}

fn server_for(store: impl ResourceStore) -> TestServer {
    let app = ServerBuilder::new().register_resource(store).build();
    TestServer::new(app)
}

// =============================================================================
// Single-resource routes
// =============================================================================

#[tokio::test]
async fn test_get_found_returns_envelope_with_self_link() {
    let store = item_store();
    let server = server_for(store.clone());
    store
        .update("42", item("42", "foo"), &Principal::Anonymous)
        .await
        .unwrap();

    let response = server.get("/items/42").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "data": {"id": "42", "name": "foo"},
            "links": [{"rel": "self", "href": "/items/42"}]
        })
    );
}

#[tokio::test]
async fn test_get_absent_returns_404_with_empty_body() {
    let server = server_for(item_store());

    let response = server.get("/items/99").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn test_put_returns_envelope_and_is_idempotent() {
    let server = server_for(item_store());

    let first = server.put("/items/42").json(&item("42", "bar")).await;
    first.assert_status_ok();

    let second = server.put("/items/42").json(&item("42", "bar")).await;
    second.assert_status_ok();

    let body = first.json::<Value>();
    assert_eq!(body, second.json::<Value>());
    assert_eq!(body["data"], json!({"id": "42", "name": "bar"}));
    assert_eq!(body["links"][0], json!({"rel": "self", "href": "/items/42"}));
}

#[tokio::test]
async fn test_put_null_body_is_silently_suppressed() {
    // Historical weak-validation policy: a null value yields an empty result
    // with 200, not a client error.
    let store = item_store();
    let server = server_for(store.clone());

    let response = server.put("/items/42").json(&Value::Null).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), Value::Null);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_post_null_body_is_silently_suppressed() {
    let store = item_store();
    let server = server_for(store.clone());

    let response = server.post("/items/42").json(&Value::Null).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), Value::Null);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_self_link_round_trip() {
    let server = server_for(item_store());

    let created = server.put("/items/42").json(&item("42", "foo")).await;
    let href = created.json::<Value>()["links"][0]["href"]
        .as_str()
        .unwrap()
        .to_string();

    let fetched = server.get(&href).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["data"], created.json::<Value>()["data"]);
}

// =============================================================================
// Collection route
// =============================================================================

#[tokio::test]
async fn test_list_empty_returns_404() {
    let server = server_for(item_store());

    let response = server.get("/items").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn test_list_returns_one_envelope_per_item() {
    let server = server_for(item_store());
    server.put("/items/a").json(&item("a", "first")).await;
    server.put("/items/b").json(&item("b", "second")).await;

    let response = server.get("/items").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);

    // One self link per item, matching the single-item GET route for its id
    assert_eq!(entries[0]["data"]["id"], "a");
    assert_eq!(entries[0]["links"][0], json!({"rel": "self", "href": "/items/a"}));
    assert_eq!(entries[1]["data"]["id"], "b");
    assert_eq!(entries[1]["links"][0], json!({"rel": "self", "href": "/items/b"}));
}

// =============================================================================
// Decorator hooks
// =============================================================================

struct CatalogDecorator;

impl ResourceDecorator<Item> for CatalogDecorator {
    fn decorate_item(&self, envelope: &mut Envelope<Item>, id: &str) {
        envelope.add_link("reviews", format!("/items/{id}/reviews"));
    }

    fn decorate_collection(&self, envelope: &mut Envelope<Vec<Envelope<Item>>>) {
        envelope.add_link("catalog", "/items");
    }
}

#[tokio::test]
async fn test_decorator_hooks_attach_extra_links() {
    let descriptor = RestResource::new(item_store()).with_decorator(CatalogDecorator);
    let app = ServerBuilder::new()
        .register_descriptor(Box::new(descriptor))
        .build();
    let server = TestServer::new(app);

    server.put("/items/42").json(&item("42", "foo")).await;

    let single = server.get("/items/42").await.json::<Value>();
    assert_eq!(
        single["links"],
        json!([
            {"rel": "self", "href": "/items/42"},
            {"rel": "reviews", "href": "/items/42/reviews"}
        ])
    );

    let collection = server.get("/items").await.json::<Value>();
    assert_eq!(collection["links"], json!([{"rel": "catalog", "href": "/items"}]));
    assert_eq!(
        collection["data"][0]["links"][1]["rel"],
        json!("reviews")
    );
}

// =============================================================================
// PUT vs POST semantics (backend-chosen behaviour)
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Cart {
    id: String,
    articles: Vec<String>,
}

/// Store where PUT replaces the cart and POST appends articles to it, the
/// shopping-cart split the update/insert contract exists for.
#[derive(Clone, Default)]
struct CartStore {
    carts: Arc<RwLock<BTreeMap<String, Cart>>>,
}

#[async_trait]
impl ResourceStore for CartStore {
    type Resource = Cart;

    fn resource_name(&self) -> &'static str {
        "carts"
    }

    fn resource_id(&self, cart: &Cart) -> String {
        cart.id.clone()
    }

    async fn list(&self, _principal: &Principal) -> Result<Vec<Cart>> {
        Ok(self.carts.read().unwrap().values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str, _principal: &Principal) -> Result<Option<Cart>> {
        Ok(self.carts.read().unwrap().get(id).cloned())
    }

    async fn update(&self, id: &str, value: Cart, _principal: &Principal) -> Result<Cart> {
        self.carts.write().unwrap().insert(id.to_string(), value.clone());
        Ok(value)
    }

    async fn insert(&self, id: &str, value: Cart, _principal: &Principal) -> Result<Cart> {
        let mut carts = self.carts.write().unwrap();
        let cart = carts.entry(id.to_string()).or_insert_with(|| Cart {
            id: id.to_string(),
            articles: Vec::new(),
        });
        cart.articles.extend(value.articles);
        Ok(cart.clone())
    }
}

#[tokio::test]
async fn test_post_appends_while_put_replaces() {
    let server = server_for(CartStore::default());
    let apple = Cart {
        id: "c1".to_string(),
        articles: vec!["apple".to_string()],
    };

    let first = server.post("/carts/c1").json(&apple).await;
    assert_eq!(first.json::<Value>()["data"]["articles"], json!(["apple"]));

    let second = server.post("/carts/c1").json(&apple).await;
    assert_eq!(
        second.json::<Value>()["data"]["articles"],
        json!(["apple", "apple"])
    );

    let replaced = server.put("/carts/c1").json(&apple).await;
    assert_eq!(replaced.json::<Value>()["data"]["articles"], json!(["apple"]));
}

// =============================================================================
// Principal pass-through
// =============================================================================

/// Store that records the principal each read was performed with.
#[derive(Clone, Default)]
struct ProbeStore {
    seen: Arc<Mutex<Option<Principal>>>,
}

#[async_trait]
impl ResourceStore for ProbeStore {
    type Resource = Value;

    fn resource_name(&self) -> &'static str {
        "probes"
    }

    fn resource_id(&self, _resource: &Value) -> String {
        "probe".to_string()
    }

    async fn list(&self, principal: &Principal) -> Result<Vec<Value>> {
        *self.seen.lock().unwrap() = Some(principal.clone());
        Ok(vec![json!({"ok": true})])
    }

    async fn get_by_id(&self, id: &str, principal: &Principal) -> Result<Option<Value>> {
        *self.seen.lock().unwrap() = Some(principal.clone());
        Ok(Some(json!({"id": id})))
    }

    async fn update(&self, _id: &str, value: Value, principal: &Principal) -> Result<Value> {
        *self.seen.lock().unwrap() = Some(principal.clone());
        Ok(value)
    }

    async fn insert(&self, _id: &str, value: Value, principal: &Principal) -> Result<Value> {
        *self.seen.lock().unwrap() = Some(principal.clone());
        Ok(value)
    }
}

#[tokio::test]
async fn test_bearer_principal_reaches_the_store() {
    let store = ProbeStore::default();
    let server = server_for(store.clone());

    server
        .get("/probes/1")
        .authorization_bearer("alice")
        .await
        .assert_status_ok();

    let seen = store.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen.subject(), Some("alice"));
}

#[tokio::test]
async fn test_missing_credentials_yield_anonymous_principal() {
    let store = ProbeStore::default();
    let server = server_for(store.clone());

    server.put("/probes/1").json(&json!({"v": 1})).await.assert_status_ok();

    let seen = store.seen.lock().unwrap().clone().unwrap();
    assert!(seen.is_anonymous());
}

// =============================================================================
// Backend failures
// =============================================================================

/// Store whose backend is unreachable; every operation fails.
#[derive(Clone)]
struct BrokenStore;

#[async_trait]
impl ResourceStore for BrokenStore {
    type Resource = Value;

    fn resource_name(&self) -> &'static str {
        "flaky"
    }

    fn resource_id(&self, _resource: &Value) -> String {
        String::new()
    }

    async fn list(&self, _principal: &Principal) -> Result<Vec<Value>> {
        Err(anyhow!("backend down"))
    }

    async fn get_by_id(&self, _id: &str, _principal: &Principal) -> Result<Option<Value>> {
        Err(anyhow!("backend down"))
    }

    async fn update(&self, _id: &str, _value: Value, _principal: &Principal) -> Result<Value> {
        Err(anyhow!("backend down"))
    }

    async fn insert(&self, _id: &str, _value: Value, _principal: &Principal) -> Result<Value> {
        Err(anyhow!("backend down"))
    }
}

#[tokio::test]
async fn test_store_failure_surfaces_as_500_with_structured_body() {
    let server = server_for(BrokenStore);

    let response = server.get("/flaky/1").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert!(body["message"].as_str().unwrap().contains("backend down"));
}

#[tokio::test]
async fn test_store_failure_on_write_surfaces_as_500() {
    let server = server_for(BrokenStore);

    let response = server.put("/flaky/1").json(&json!({"v": 1})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["code"], "STORAGE_ERROR");
}

// =============================================================================
// Process-wide middleware scope
// =============================================================================

#[tokio::test]
async fn test_empty_rewrite_applies_to_custom_routes() {
    let custom = Router::new().route("/raw-empty", get(|| async { Json(json!([])) }));
    let app = ServerBuilder::new().with_custom_routes(custom).build();
    let server = TestServer::new(app);

    let response = server.get("/raw-empty").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_health_is_not_rewritten() {
    let server = server_for(item_store());
    server.get("/healthz").await.assert_status_ok();
}
