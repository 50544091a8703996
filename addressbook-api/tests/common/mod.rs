/// Common test utilities for integration tests
///
/// Builds the full router over an in-memory store and offers small helpers
/// for sending JSON requests and reading JSON responses.

use addressbook_api::app::{build_router, AppState};
use addressbook_api::config::Config;
use addressbook_shared::models::address::{Address, AddressPatch, CreateAddress};
use addressbook_shared::models::user::{CreateUser, User};
use addressbook_shared::store::{memory::MemoryStore, AddressStore, StoreResult};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Test context containing the app and its backing store
pub struct TestContext {
    pub store: MemoryStore,
    pub app: axum::Router,
}

impl TestContext {
    /// Fresh app with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::in_memory())
    }

    /// Fresh app with strict not-found mode switched on
    pub fn strict() -> Self {
        let mut config = Config::in_memory();
        config.api.strict_not_found = true;
        Self::with_config(config)
    }

    fn with_config(config: Config) -> Self {
        let store = MemoryStore::new();
        let app = build_router(AppState::new(Arc::new(store.clone()), config));
        Self { store, app }
    }

    /// Adds a user directly to the store
    pub async fn create_user(&self) -> User {
        self.store
            .insert_user(CreateUser {
                name: Some("Test User".to_string()),
                email: None,
            })
            .await
    }

    /// Sends a request and returns status plus parsed JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send_to(&self.app, method, uri, body).await
    }

    /// Creates an address for `user_id` through the API, returning its JSON
    pub async fn create_address(&self, user_id: &str, full_name: &str) -> Value {
        let mut body = address_body(full_name);
        body["user_id"] = json!(user_id);

        let (status, json) = self.send("POST", "/api/addresses", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
        json["address"].clone()
    }
}

/// Sends a request to any router
pub async fn send_to(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
        })
    };

    (status, json)
}

/// A complete, valid set of address fields (without `user_id`)
pub fn address_body(full_name: &str) -> Value {
    json!({
        "fullName": full_name,
        "mobileNumber": "9876543210",
        "pincode": "411001",
        "flatNo": "12B",
        "city": "Pune",
        "state": "Maharashtra",
        "street": "FC Road",
        "landmark": "Near the park"
    })
}

/// Router over a store whose every call fails
///
/// Any request that reaches the datastore answers 500, so a 400 proves the
/// handler stopped before the lookup.
pub fn unreachable_store_app() -> axum::Router {
    build_router(AppState::new(Arc::new(UnreachableStore), Config::in_memory()))
}

struct UnreachableStore;

#[async_trait::async_trait]
impl AddressStore for UnreachableStore {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn list_user_addresses(
        &self,
        _user_id: Uuid,
    ) -> StoreResult<Option<Vec<Address>>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn create_address_for_user(
        &self,
        _user_id: Uuid,
        _data: CreateAddress,
    ) -> StoreResult<Option<Address>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_address(
        &self,
        _address_id: Uuid,
    ) -> StoreResult<Option<Address>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update_address(
        &self,
        _address_id: Uuid,
        _patch: AddressPatch,
    ) -> StoreResult<Option<Address>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete_address(&self, _address_id: Uuid) -> StoreResult<bool> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
